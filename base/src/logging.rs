pub use tracing::{debug, info, info_span, warn};
