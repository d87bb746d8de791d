//! Integration tests for configuration loading

#[cfg(test)]
mod tests {
    use kiln_config::{Config, DescriptorOrder};
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_load_missing_file_is_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("kiln.toml");
        assert!(Config::load(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_load_or_default_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("kiln.toml");
        let config = Config::load_or_default(&path).await.unwrap();
        assert!(!config.build.skip_tests);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("kiln.toml");
        tokio::fs::write(
            &path,
            r#"
            [build]
            skip_tests = true
            jobs = 2

            [paths]
            build_root = "out/build"
            store_root = "/var/lib/kiln/store"
            "#,
        )
        .await
        .unwrap();

        let config = Config::load(&path).await.unwrap();
        assert!(config.build.skip_tests);
        assert_eq!(config.build.effective_jobs(), 2);
        assert_eq!(config.paths.build_root, PathBuf::from("out/build"));
        assert_eq!(
            config.paths.effective_store_root(),
            PathBuf::from("/var/lib/kiln/store")
        );
        assert_eq!(config.generator.order, DescriptorOrder::DepsFirst);
    }

    #[test]
    fn test_merge_env_overrides() {
        std::env::set_var("KILN_SKIP_TESTS", "1");
        std::env::set_var("KILN_JOBS", "3");
        let mut config = Config::default();
        config.merge_env().unwrap();
        std::env::remove_var("KILN_SKIP_TESTS");
        std::env::remove_var("KILN_JOBS");

        assert!(config.build.skip_tests);
        assert_eq!(config.build.effective_jobs(), 3);
    }

    #[tokio::test]
    async fn test_invalid_toml_is_parse_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("kiln.toml");
        tokio::fs::write(&path, "[build\nskip_tests = yes").await.unwrap();
        let err = Config::load(&path).await.unwrap_err();
        assert!(err.to_string().contains("parse"));
    }
}
