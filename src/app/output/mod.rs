// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::convert::TryFrom;
use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::Error;

pub mod json;
pub mod summary;

pub use json::JsonFormat;
pub use summary::{SummaryFormat, SummaryFormatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    Json,
    Summary,
}

impl TryFrom<&str> for OutputType {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        match value {
            "json" => Ok(OutputType::Json),
            "summary" => Ok(OutputType::Summary),
            _ => Err(Error::ParserError {
                what: value.to_string(),
                to: "OutputType",
                why: "invalid output type".to_string(),
            }),
        }
    }
}

pub trait OutputFormat<T> {
    fn output<W: Write>(&self, writer: &mut W, data: &T) -> Result<()>;
}

#[derive(Debug)]
pub enum OutputConfig {
    Json { format: JsonFormat },
    Summary { format: SummaryFormat },
}

impl OutputConfig {
    pub fn json() -> Self {
        OutputConfig::Json {
            format: JsonFormat::default(),
        }
    }

    pub fn summary() -> Self {
        OutputConfig::Summary {
            format: SummaryFormat::default(),
        }
    }
}

impl From<OutputType> for OutputConfig {
    fn from(output_type: OutputType) -> Self {
        match output_type {
            OutputType::Json => OutputConfig::json(),
            OutputType::Summary => OutputConfig::summary(),
        }
    }
}

#[derive(Debug)]
pub struct Output<'a> {
    config: &'a OutputConfig,
}

impl Output<'_> {
    pub fn new(config: &OutputConfig) -> Output<'_> {
        Output { config }
    }
}

impl<T: Serialize + SummaryFormatter> OutputFormat<T> for Output<'_> {
    fn output<W: Write>(&self, writer: &mut W, data: &T) -> Result<()> {
        match self.config {
            OutputConfig::Json { format } => format.output(writer, data),
            OutputConfig::Summary { format } => format.output(writer, data),
        }
    }
}
