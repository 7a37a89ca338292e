// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Returns true if the error came from the contents of a config file
    /// rather than from reading it.
    pub fn is_config_content(&self) -> bool {
        matches!(
            self,
            Error::ConfigParse(_) | Error::InvalidColor(_) | Error::InvalidConfig(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
