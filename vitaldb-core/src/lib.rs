pub mod chart;
pub mod table;
pub mod url_sync;
pub mod util;

mod loader;
pub use loader::{CaseSource, HttpSource, LoadError, LoadStatus, Loader, LoaderState};

mod logic;
pub use logic::{Logic, LogicArgs};

mod notification;
pub use notification::{Notification, NotificationKind, Notifier};

mod tokio_thread;
pub use tokio_thread::TokioThread;

mod tracks;
pub use tracks::{TrackSelection, viewer_query};

pub use vitaldb_state as vs;
