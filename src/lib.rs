pub mod libs;

pub use libs::client::api::{HttpMailApi, MailApi};
pub use libs::client::auth::Auth;
pub use libs::client::wizard::Wizard;
pub use libs::models::{MailSaved, MailSubmission};
pub use libs::server::config::Settings;
pub use libs::server::{router, start_server};
