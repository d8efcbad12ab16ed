mod maybe_dyn;
mod signal;

pub use maybe_dyn::{IntoMaybeDyn, MaybeDyn};
pub use signal::{create_signal, Signal};
