//! Options methods for [`FoldEngine`].

use super::{prepare, FoldEngine};
use crate::error::FoldError;
use crate::options::Options;

impl FoldEngine {
    /// Replace options and rebuild under them.
    ///
    /// Layout, scene and animation settings take effect immediately; the
    /// `[sheet]` section only seeds [`FoldEngine::new`] and is stored as is.
    pub fn set_options(&mut self, new: Options) -> Result<(), FoldError> {
        let state = self.state.clone();
        let (config, tree) = prepare(&state, &new, self.animator.progress())?;
        self.animator.set_options(&new.animation);
        self.options = new;
        self.commit(state, config, tree);
        Ok(())
    }
}
