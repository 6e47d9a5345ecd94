//! Static screens: welcome banner, help, tool description.

pub mod banner;
pub mod theme;

pub use banner::{
    CONTACT, print_help, print_info, print_interactive_help, print_version, print_welcome,
    shutdown_notice,
};
