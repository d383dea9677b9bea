//! Integration tests for Ostriv

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::net::TcpListener;
    use tempfile::TempDir;

    /// Command isolated from the user's config and CMS environment
    fn ostriv(config_dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("ostriv");
        cmd.env("OSTRIV_CONFIG", config_dir.path().join("config.toml"))
            .env_remove("OSTRIV_CMS_URL")
            .env_remove("PAYLOAD_URL")
            .env_remove("CMS_URL")
            .env_remove("OSTRIV_SITE_URL");
        cmd
    }

    /// A CMS URL nothing answers on
    fn dead_cms() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    #[test]
    fn help_displays() {
        let dir = TempDir::new().unwrap();
        ostriv(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("storefront catalog client"));
    }

    #[test]
    fn version_displays() {
        let dir = TempDir::new().unwrap();
        ostriv(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("ostriv"));
    }

    #[test]
    fn config_path() {
        let dir = TempDir::new().unwrap();
        ostriv(&dir)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let dir = TempDir::new().unwrap();
        ostriv(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]"))
            .stdout(predicate::str::contains("ttl_secs = 60"));
    }

    #[test]
    fn config_set_then_show() {
        let dir = TempDir::new().unwrap();
        ostriv(&dir)
            .args(["config", "set", "search.max_suggestions", "5"])
            .assert()
            .success();

        ostriv(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("max_suggestions = 5"));
    }

    #[test]
    fn config_set_unknown_key() {
        let dir = TempDir::new().unwrap();
        ostriv(&dir)
            .args(["config", "set", "cache.size", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn categories_fall_back_when_cms_is_down() {
        let dir = TempDir::new().unwrap();
        ostriv(&dir)
            .args(["categories", "--format", "plain", "--cms-url", &dead_cms()])
            .assert()
            .success()
            .stdout(predicate::str::contains("power-tools"))
            .stdout(predicate::str::contains("consumables"));
    }

    #[test]
    fn products_empty_when_cms_is_down() {
        let dir = TempDir::new().unwrap();
        ostriv(&dir)
            .args(["products", "--format", "json", "--cms-url", &dead_cms()])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("[]"));
    }

    #[test]
    fn product_fails_when_cms_is_down() {
        let dir = TempDir::new().unwrap();
        ostriv(&dir)
            .args(["product", "some-slug", "--cms-url", &dead_cms()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("CMS unreachable"));
    }

    #[test]
    fn sitemap_lists_static_pages() {
        let dir = TempDir::new().unwrap();
        ostriv(&dir)
            .args(["sitemap", "--cms-url", &dead_cms(), "--site-url", "https://shop.example/"])
            .assert()
            .success()
            .stdout(predicate::str::contains("<loc>https://shop.example/</loc>"))
            .stdout(predicate::str::contains("<loc>https://shop.example/wishlist</loc>"));
    }

    #[test]
    fn search_submit_prints_destination() {
        let dir = TempDir::new().unwrap();
        ostriv(&dir)
            .args(["search", " дриль bosch ", "--submit", "--format", "plain"])
            .args(["--cms-url", &dead_cms()])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "/catalog?search=%D0%B4%D1%80%D0%B8%D0%BB%D1%8C%20bosch",
            ));
    }

    #[test]
    fn search_reads_keystrokes_from_stdin() {
        let dir = TempDir::new().unwrap();
        ostriv(&dir)
            .args(["search", "--stdin", "--format", "json", "--cms-url", &dead_cms()])
            .write_stdin("g\ngr\ngri\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"query\": \"gri\""))
            .stdout(predicate::str::contains("\"suggestions\": []"));
    }

    #[test]
    fn cms_pointing_at_storefront_is_rejected() {
        let dir = TempDir::new().unwrap();
        ostriv(&dir)
            .args(["categories", "--site-url", "https://shop.example"])
            .args(["--cms-url", "https://shop.example/"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("points at the storefront"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn contact_fails_when_cms_is_down() {
        let dir = TempDir::new().unwrap();
        ostriv(&dir)
            .args(["contact", "--name", "Ivan", "--phone", "+380501112233"])
            .args(["--cms-url", &dead_cms()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("CMS unreachable"));
    }
}
