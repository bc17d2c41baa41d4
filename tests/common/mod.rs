//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::process::Command;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Person {
    pub fn new(name: &str, age: u32) -> Self {
        Self {
            name: name.to_string(),
            age,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub tags: Vec<String>,
    pub address: Address,
}

pub fn customer() -> Customer {
    Customer {
        name: "ada".to_string(),
        tags: vec!["vip".to_string()],
        address: Address {
            city: "London".to_string(),
            lines: vec!["1 Main St".to_string()],
        },
    }
}

/// The `kitbash` binary with a clean logging environment.
pub fn kitbash() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_kitbash"));
    cmd.env_remove("KITBASH_LOG");
    cmd.env_remove("KITBASH_USERNAME");
    cmd.env_remove("KITBASH_PASSWORD");
    cmd.env_remove("KITBASH_AUDIT_PATH");
    cmd.env_remove("KITBASH_TREE_SEPARATOR");
    cmd.env_remove("KITBASH_REGISTRY_POLICY");
    cmd
}
