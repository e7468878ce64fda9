// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "annofilter")]
#[command(author, version, about = "Select Kubernetes resources by metadata annotations")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Resources to inspect: built-in kinds or aliases (nodes, deploy),
    /// VERSION/RESOURCE or GROUP/VERSION/RESOURCE. Comma-separated lists are accepted.
    /// Defaults to the resources saved with `annofilter config`.
    #[arg(value_name = "RESOURCE")]
    pub resources: Vec<String>,

    /// Annotation key to match on
    #[arg(short, long, value_name = "KEY")]
    pub annotation: Option<String>,

    /// Match resources where the annotation is absent (or not equal to --equals)
    #[arg(long)]
    pub absent: bool,

    /// Compare the annotation value (equality, or inequality with --absent)
    #[arg(short, long, value_name = "VALUE")]
    pub equals: Vec<String>,

    /// Kubernetes context to use (defaults to saved config, then kubeconfig current context)
    #[arg(short, long, value_name = "CONTEXT")]
    pub context: Option<String>,

    /// Restrict namespaced resources to one namespace (default: all namespaces)
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Read resources from a JSON or YAML file instead of a cluster
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Omit column headers in output
    #[arg(long)]
    pub no_headers: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List built-in resource kinds and their aliases
    Kinds,

    /// List contexts from kubeconfig
    Contexts,

    /// Show or update saved defaults
    Config {
        /// Default context
        #[arg(short, long)]
        context: Option<String>,

        /// Default resources (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        resources: Option<Vec<String>>,

        /// Default namespace
        #[arg(short, long)]
        namespace: Option<String>,

        /// Reset all saved defaults
        #[arg(long, conflicts_with_all = ["context", "resources", "namespace"])]
        clear: bool,
    },
}

#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
    Yaml,
}
