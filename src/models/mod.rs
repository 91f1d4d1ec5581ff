pub mod answer;
pub mod conversation;
pub mod enums;
pub mod profile;
pub mod question;
pub mod screening;

pub use answer::*;
pub use conversation::*;
pub use enums::*;
pub use profile::*;
pub use question::*;
pub use screening::*;
