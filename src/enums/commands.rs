use clap::Subcommand;
use crate::enums::changeable_field::ChangeableField;
use crate::enums::request_status::RequestStatus;
use crate::enums::sort_order::SortOrder;

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample configuration file
    Init,
    /// Check the configuration file
    Validate,
    Login {
        #[clap(short, long)]
        username: String,
        #[clap(short, long, env = "GPULAB_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Whoami,
    /// Show resource groups, images and Unix groups
    Catalog,
    /// List your server requests
    Requests {
        #[clap(short, long, value_enum)]
        status: Option<RequestStatus>,
        #[clap(long, value_enum)]
        sort: Option<SortOrder>,
        #[clap(short = 'q', long)]
        search: Option<String>,
    },
    /// List your change requests
    ChangeRequests {
        #[clap(short, long, value_enum)]
        status: Option<RequestStatus>,
        #[clap(long, value_enum)]
        sort: Option<SortOrder>,
        #[clap(short = 'q', long)]
        search: Option<String>,
    },
    /// Submit a new server request
    Request {
        #[clap(long)]
        resource_group: i64,
        #[clap(long)]
        image: i64,
        /// Volume size in GiB
        #[clap(long)]
        volume: String,
        /// Expiry date, YYYY-MM-DD
        #[clap(long)]
        expires: String,
        /// PORT or PORT:PURPOSE, repeatable
        #[clap(short, long)]
        port: Vec<String>,
        #[clap(short, long)]
        group: Vec<i64>,
        #[clap(short, long)]
        reason: String,
    },
    /// Request a change to an approved server
    Change {
        request_id: i64,
        #[clap(value_enum)]
        field: ChangeableField,
        /// New value for scalar fields
        #[clap(long)]
        value: Option<String>,
        #[clap(short, long)]
        group: Vec<i64>,
        /// PORT or PORT:PURPOSE, repeatable
        #[clap(short, long)]
        port: Vec<String>,
        #[clap(short, long)]
        reason: String,
    },
    CreateGroup {
        name: String,
    },
    /// Admin review queue
    Review {
        #[clap(subcommand)]
        action: ReviewAction,
    },
}

#[derive(Subcommand)]
pub enum ReviewAction {
    List,
    Approve {
        #[clap(long, conflicts_with = "change_request", required_unless_present = "change_request")]
        request: Option<i64>,
        #[clap(long)]
        change_request: Option<i64>,
    },
    Deny {
        #[clap(long, conflicts_with = "change_request", required_unless_present = "change_request")]
        request: Option<i64>,
        #[clap(long)]
        change_request: Option<i64>,
        #[clap(short, long)]
        reason: String,
    },
}
