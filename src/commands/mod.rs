//! CLI subcommands

pub mod kubeconfig;
