/*!
 * Integration tests for the TOML cluster registry
 */

use assert_fs::prelude::*;
use kubefetch::config::AppConfig;
use kubefetch::directory::resolve;
use kubefetch::KubefetchError;

const REGISTRY: &str = r#"
[ssh]
user = "ubuntu"
key_dir = "/tmp/keys"

[kube]
dir = "/tmp/kube"

[[clusters]]
name = "demo"

[[clusters.nodes]]
name = "demo-master-01"
is_master = true
ip_address = "203.0.113.9"
private_ip_address = "10.0.0.5"
ssh_key_name = "demo-key"

[[clusters.nodes]]
name = "demo-worker-01"
ip_address = "203.0.113.10"
private_ip_address = "10.0.0.6"
ssh_key_name = "demo-key"

[[clusters]]
name = "empty"
"#;

#[test]
fn test_load_and_resolve_registry() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("config.toml");
    file.write_str(REGISTRY).unwrap();

    let config = AppConfig::load(file.path()).unwrap();
    assert_eq!(config.ssh.user, "ubuntu");
    assert_eq!(config.ssh.port, 22);
    assert_eq!(config.ssh.timeout_secs, 30);
    assert_eq!(config.kube.resolved_dir().unwrap(), std::path::Path::new("/tmp/kube"));
    assert_eq!(config.clusters.len(), 2);

    let master = resolve(&config, "demo").unwrap();
    assert_eq!(master.name, "demo-master-01");
    assert_eq!(master.public_address, "203.0.113.9");
    assert_eq!(master.private_address, "10.0.0.5");
    assert_eq!(master.credential_key_name, "demo-key");
}

#[test]
fn test_cluster_without_nodes_has_no_master() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("config.toml");
    file.write_str(REGISTRY).unwrap();

    let config = AppConfig::load(file.path()).unwrap();
    assert!(matches!(
        resolve(&config, "empty"),
        Err(KubefetchError::MasterNotFound { .. })
    ));
}

#[test]
fn test_missing_file_is_empty_registry() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = AppConfig::load(temp.child("absent.toml").path()).unwrap();

    assert_eq!(config, AppConfig::default());
    assert!(matches!(
        resolve(&config, "demo"),
        Err(KubefetchError::ClusterNotFound { .. })
    ));
}

#[test]
fn test_malformed_file_is_config_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("config.toml");
    file.write_str("[[clusters]\nname = ").unwrap();

    let err = AppConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, KubefetchError::Config(_)));
    assert_eq!(err.exit_code(), 2);
}
