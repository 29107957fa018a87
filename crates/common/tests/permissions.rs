//! Integration tests for file access control

mod common;

use ::common::fs::{FsError, Operation, Permission};

use self::common::{ADMIN, JOAO, MARIA};

#[test]
fn test_missing_paths_are_not_found_for_everyone() {
    let mut fs = common::setup_test_fs();

    for user in [ADMIN, JOAO, MARIA] {
        let result = fs.read_file("/nothing/here.txt", user);
        assert!(matches!(result, Err(FsError::NotFound(_))));

        let result = fs.write_file("/nothing/here.txt", "x", user);
        assert!(matches!(result, Err(FsError::NotFound(_))));

        let result = fs.delete_file("/nothing/here.txt", user);
        assert!(matches!(result, Err(FsError::NotFound(_))));
    }

    assert!(fs.journal().is_empty());
    assert!(!fs.directory_exists("/nothing"));
}

#[test]
fn test_creator_is_the_only_one_with_access() {
    let mut fs = common::setup_test_fs();
    fs.create_file("/notes.txt", "secret", JOAO).unwrap();

    assert_eq!(fs.read_file("/notes.txt", JOAO).unwrap(), b"secret");

    let result = fs.read_file("/notes.txt", MARIA);
    assert_eq!(
        result,
        Err(FsError::PermissionDenied {
            user: MARIA.to_string(),
            op: Operation::Read,
            path: "/notes.txt".to_string(),
        })
    );

    // not even the admin can read without a grant
    assert!(matches!(
        fs.read_file("/notes.txt", ADMIN),
        Err(FsError::PermissionDenied { .. })
    ));
}

#[test]
fn test_write_then_read_roundtrip() {
    let mut fs = common::setup_test_fs();
    fs.create_file("/f.txt", "", JOAO).unwrap();

    for content in ["a", "", "ünïcödé", "multi\nline\ncontent"] {
        fs.write_file("/f.txt", content, JOAO).unwrap();
        assert_eq!(fs.read_file("/f.txt", JOAO).unwrap(), content.as_bytes());
    }
}

#[test]
fn test_read_only_user_cannot_write_or_delete() {
    let mut fs = common::setup_projects();
    let path = "/root/projetos/projeto2.txt";
    fs.set_file_permission(path, MARIA, Permission::Read, ADMIN)
        .unwrap();

    assert_eq!(fs.read_file(path, MARIA).unwrap(), "progresso".as_bytes());
    assert!(matches!(
        fs.write_file(path, "tentativa de edição", MARIA),
        Err(FsError::PermissionDenied {
            op: Operation::Write,
            ..
        })
    ));
    assert!(matches!(
        fs.delete_file(path, MARIA),
        Err(FsError::PermissionDenied {
            op: Operation::Delete,
            ..
        })
    ));
    assert_eq!(fs.read_file(path, ADMIN).unwrap(), "progresso".as_bytes());
}

#[test]
fn test_write_level_allows_delete_without_read() {
    let mut fs = common::setup_projects();
    let path = "/root/projetos/projeto1.txt";
    fs.set_file_permission(path, JOAO, Permission::Write, ADMIN)
        .unwrap();

    assert!(matches!(
        fs.read_file(path, JOAO),
        Err(FsError::PermissionDenied { .. })
    ));
    fs.write_file(path, "blind write", JOAO).unwrap();
    fs.delete_file(path, JOAO).unwrap();
    assert!(fs.find_file(path).is_none());
}

#[test]
fn test_rw_level_allows_delete() {
    let mut fs = common::setup_projects();
    let path = "/root/projetos/projeto1.txt";
    fs.set_file_permission(path, MARIA, Permission::ReadWrite, ADMIN)
        .unwrap();

    fs.delete_file(path, MARIA).unwrap();
    let last = fs.journal().last().unwrap();
    assert_eq!(last.user, MARIA);
    assert_eq!(last.content, "documentação inicial".as_bytes());
}

#[test]
fn test_non_admin_can_never_grant() {
    let mut fs = common::setup_projects();
    let targets = [
        "/root/projetos/projeto1.txt",
        "/root/projetos/missing.txt",
        "/",
    ];

    for path in targets {
        for level in Permission::ALL {
            let result = fs.set_file_permission(path, MARIA, level, JOAO);
            assert!(matches!(
                result,
                Err(FsError::PermissionDenied {
                    op: Operation::Grant,
                    ..
                })
            ));
        }
    }

    assert_eq!(
        fs.find_file("/root/projetos/projeto1.txt")
            .unwrap()
            .permission_of(MARIA),
        Permission::None
    );
}

#[test]
fn test_owner_without_admin_role_cannot_grant() {
    let mut fs = common::setup_test_fs();
    fs.create_file("/mine.txt", "", JOAO).unwrap();

    let result = fs.set_file_permission("/mine.txt", MARIA, Permission::Read, JOAO);
    assert!(matches!(result, Err(FsError::PermissionDenied { .. })));
}

#[test]
fn test_grant_overwrites_previous_level() {
    let mut fs = common::setup_projects();
    let path = "/root/projetos/projeto1.txt";

    fs.set_file_permission(path, JOAO, Permission::ReadWrite, ADMIN)
        .unwrap();
    fs.set_file_permission(path, JOAO, Permission::None, ADMIN)
        .unwrap();

    assert!(fs.read_file(path, JOAO).is_err());
    assert!(fs.write_file(path, "x", JOAO).is_err());
}

#[test]
fn test_invalid_level_is_rejected_before_reaching_the_file() {
    let fs = common::setup_projects();

    let result = "rwx".parse::<Permission>();
    assert_eq!(result, Err(FsError::InvalidPermission("rwx".to_string())));

    let entry = fs.find_file("/root/projetos/projeto1.txt").unwrap();
    assert_eq!(entry.acl().len(), 1);
}
