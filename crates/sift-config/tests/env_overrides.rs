use figment::Jail;
use pretty_assertions::assert_eq;
use sift_config::SiftConfig;

#[test]
fn database_url_sets_store_url() {
    Jail::expect_with(|jail| {
        jail.set_env("DATABASE_URL", "./from-env.db");
        let config = SiftConfig::load().expect("config loads");
        assert_eq!(config.database.url, "./from-env.db");
        assert!(config.database.is_configured());
        Ok(())
    });
}

#[test]
fn prefixed_env_nests_with_double_underscore() {
    Jail::expect_with(|jail| {
        jail.set_env("SIFT_DATABASE__RETRY_ATTEMPTS", "7");
        jail.set_env("SIFT_DATABASE__REQUIRE_TLS", "true");
        jail.set_env("SIFT_GENERAL__HISTOGRAM_BINS", "50");
        let config = SiftConfig::load().expect("config loads");
        assert_eq!(config.database.retry_attempts, 7);
        assert!(config.database.require_tls);
        assert_eq!(config.general.histogram_bins, 50);
        Ok(())
    });
}

#[test]
fn database_url_beats_prefixed_url() {
    Jail::expect_with(|jail| {
        jail.set_env("SIFT_DATABASE__URL", "./prefixed.db");
        jail.set_env("DATABASE_URL", "./bare.db");
        let config = SiftConfig::load().expect("config loads");
        assert_eq!(config.database.url, "./bare.db");
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".sift")?;
        jail.create_file(".sift/config.toml", "[general]\npreview_rows = 3\n")?;
        jail.set_env("SIFT_GENERAL__PREVIEW_ROWS", "9");
        let config = SiftConfig::load().expect("config loads");
        assert_eq!(config.general.preview_rows, 9);
        Ok(())
    });
}
