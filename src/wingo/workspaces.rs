//! Live workspace state queried over the command socket.

use crate::ipc::frame::command;
use crate::traits::CommandTransport;

/// One workspace as reported by the window manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub name: String,
    pub has_clients: bool,
    pub is_current: bool,
}

impl Workspace {
    pub fn new(name: impl Into<String>, has_clients: bool, is_current: bool) -> Self {
        Self {
            name: name.into(),
            has_clients,
            is_current,
        }
    }
}

/// Query the ordered workspace list, the focused workspace and, per
/// workspace, whether it hosts any clients.
///
/// Issues `2 + n` sequential round trips.  The first transport error aborts
/// the snapshot.
pub fn capture<T: CommandTransport>(conn: &mut T) -> Result<Vec<Workspace>, T::Error> {
    let list = conn.send(&command("GetWorkspaceList", &[]))?;
    let current = conn.send(&command("GetWorkspace", &[]))?;

    let mut workspaces = Vec::new();
    for name in list.split('\n').map(str::trim).filter(|n| !n.is_empty()) {
        let clients = conn.send(&command("GetClientList", &[name]))?;
        workspaces.push(Workspace::new(
            name,
            !clients.trim().is_empty(),
            name == current,
        ));
    }
    Ok(workspaces)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A scripted transport that records every command it sees.
    struct MockTransport {
        sent: Vec<String>,
        fail_on: Option<&'static str>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock transport error")]
    struct MockError;

    impl MockTransport {
        fn new() -> Self {
            Self {
                sent: Vec::new(),
                fail_on: None,
            }
        }
    }

    impl CommandTransport for MockTransport {
        type Error = MockError;

        fn send(&mut self, cmd: &str) -> Result<String, MockError> {
            self.sent.push(cmd.to_string());
            if self.fail_on == Some(cmd) {
                return Err(MockError);
            }
            Ok(match cmd {
                "GetWorkspaceList" => "1\n2\n3".into(),
                "GetWorkspace" => "2".into(),
                "GetClientList \"1\"" => "4194307".into(),
                _ => String::new(),
            })
        }
    }

    #[test]
    fn captures_in_server_order() {
        let mut conn = MockTransport::new();
        let ws = capture(&mut conn).unwrap();
        assert_eq!(
            ws,
            vec![
                Workspace::new("1", true, false),
                Workspace::new("2", false, true),
                Workspace::new("3", false, false),
            ]
        );
    }

    #[test]
    fn issues_two_plus_n_sequential_queries() {
        let mut conn = MockTransport::new();
        capture(&mut conn).unwrap();
        assert_eq!(
            conn.sent,
            vec![
                "GetWorkspaceList",
                "GetWorkspace",
                "GetClientList \"1\"",
                "GetClientList \"2\"",
                "GetClientList \"3\"",
            ]
        );
    }

    #[test]
    fn transport_error_propagates() {
        let mut conn = MockTransport::new();
        conn.fail_on = Some("GetClientList \"2\"");
        assert!(capture(&mut conn).is_err());
        assert_eq!(conn.sent.len(), 4);
    }
}
