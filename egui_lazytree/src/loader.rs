//! Background child fetching for lazy nodes.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use crate::node::TreeNode;

/// Argument handed to the loader when a lazy node is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Key of the activated node.
    pub key: String,
    /// The node's current children (empty on a first activation).
    pub children: Vec<TreeNode>,
}

/// What a loader resolves to: the node's new children, or an error message.
pub type LoadResult = Result<Vec<TreeNode>, String>;

/// Caller-supplied child fetch. Runs on a worker thread, so it may block.
pub type ChildLoader = dyn Fn(LoadRequest) -> LoadResult + Send + Sync;

/// In-flight fetches, one receiver per activated node key.
#[derive(Default)]
pub(crate) struct PendingLoads {
    in_flight: HashMap<String, Receiver<LoadResult>>,
}

impl PendingLoads {
    /// True while `key` has an unresolved fetch.
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.in_flight.contains_key(key)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }

    /// Drop all in-flight receivers; late results are discarded.
    pub(crate) fn clear(&mut self) {
        self.in_flight.clear();
    }

    /// Spawn the fetch for `request.key` on a worker thread.
    pub(crate) fn begin(
        &mut self,
        ctx: &egui::Context,
        loader: &Arc<ChildLoader>,
        request: LoadRequest,
    ) {
        let (tx, rx) = mpsc::channel();
        self.in_flight.insert(request.key.clone(), rx);

        let loader = Arc::clone(loader);
        let ctx = ctx.clone();
        thread::spawn(move || {
            let result = loader(request);
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    /// Drain fetches that have finished since the last frame.
    pub(crate) fn poll(&mut self) -> Vec<(String, LoadResult)> {
        let mut finished = Vec::new();
        self.in_flight.retain(|key, rx| match rx.try_recv() {
            Ok(result) => {
                finished.push((key.clone(), result));
                false
            }
            Err(TryRecvError::Empty) => true,
            Err(TryRecvError::Disconnected) => {
                finished.push((key.clone(), Err("child fetch was cancelled".to_string())));
                false
            }
        });
        finished
    }
}
