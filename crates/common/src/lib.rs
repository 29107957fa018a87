/**
 * The filesystem engine.
 *  - Directory / file tree and path resolution
 *  - Per-file ACLs and the admin role
 *  - The mutation journal and crash recovery
 */
pub mod fs;

pub mod prelude {
    pub use crate::fs::{
        AccessPolicy, Filesystem, FsError, Journal, JournalAction, JournalEntry, Listing,
        Operation, Permission, Principal, ReplayStats, Role,
    };
}
