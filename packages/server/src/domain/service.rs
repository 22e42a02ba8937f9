//! Pure domain functions.

use super::ConnectionId;

/// Select the connections a broadcast goes to.
///
/// With `exclude` set, that connection is left out (typing notices are
/// never echoed to their sender).
pub fn broadcast_targets(
    connected: Vec<ConnectionId>,
    exclude: Option<&ConnectionId>,
) -> Vec<ConnectionId> {
    match exclude {
        Some(excluded) => connected.into_iter().filter(|id| id != excluded).collect(),
        None => connected,
    }
}
