#[cfg(test)]
mod tests {
    use cmetrack::db::admins::Admins;
    use cmetrack::db::db::Db;
    use cmetrack::libs::admin::AdminSummary;
    use cmetrack::libs::error::RecordError;
    use cmetrack::libs::secret::{hash_password, verify_password};
    use cmetrack::server::auth::SessionKeys;

    fn admin() -> AdminSummary {
        AdminSummary {
            id: 7,
            username: "registrar".to_string(),
        }
    }

    #[test]
    fn test_password_hash_is_salted_argon2() {
        let first = hash_password("correct horse").unwrap();
        let second = hash_password("correct horse").unwrap();

        assert!(first.starts_with("$argon2"));
        assert_ne!(first, second);
        assert!(verify_password("correct horse", &first));
        assert!(!verify_password("wrong horse", &first));
        assert!(!verify_password("correct horse", "plaintext"));
        assert!(matches!(hash_password(""), Err(RecordError::Validation(_))));
    }

    #[test]
    fn test_admin_storage_never_keeps_plaintext() {
        let db = Db::in_memory().unwrap();
        let admins = Admins::new(&db.conn);
        admins.create(" registrar ", "pa55word").unwrap();

        let stored = admins.find_by_username("registrar").unwrap().unwrap();
        assert_ne!(stored.password_hash, "pa55word");
        assert_eq!(admins.authenticate("registrar", "pa55word").unwrap().username, "registrar");
        assert!(matches!(admins.authenticate("registrar", "nope"), Err(RecordError::Auth(_))));
        assert!(matches!(admins.authenticate("nobody", "pa55word"), Err(RecordError::Auth(_))));
    }

    #[test]
    fn test_admin_validation() {
        let db = Db::in_memory().unwrap();
        let admins = Admins::new(&db.conn);
        assert!(matches!(admins.create("  ", "pw"), Err(RecordError::Validation(_))));

        admins.create("zoe", "pw").unwrap();
        admins.create("amy", "pw").unwrap();
        assert!(matches!(admins.create("zoe", "other"), Err(RecordError::Storage(_))));

        let names: Vec<String> = admins.list().unwrap().into_iter().map(|a| a.username).collect();
        assert_eq!(names, vec!["amy", "zoe"]);
    }

    #[test]
    fn test_session_token_round_trip() {
        let keys = SessionKeys::new("unit-test-secret");
        let (token, expires_at) = keys.issue(&admin()).unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "registrar");
        assert_eq!(claims.exp, expires_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_session_token_rejects_other_secret_and_garbage() {
        let (token, _) = SessionKeys::new("secret-one").issue(&admin()).unwrap();

        assert!(matches!(SessionKeys::new("secret-two").verify(&token), Err(RecordError::Auth(_))));
        assert!(matches!(SessionKeys::new("secret-one").verify("garbage"), Err(RecordError::Auth(_))));
    }

    #[test]
    fn test_missing_secret_still_issues_tokens() {
        let keys = SessionKeys::from_secret(None);
        let (token, _) = keys.issue(&admin()).unwrap();
        assert!(keys.verify(&token).is_ok());

        let (foreign, _) = SessionKeys::from_secret(Some("")).issue(&admin()).unwrap();
        assert!(keys.verify(&foreign).is_err());
    }
}
