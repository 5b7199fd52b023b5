// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;

use super::OutputFormat;
use crate::fold::FinalMapping;

#[derive(Debug, Default)]
pub struct SummaryFormat {}

pub trait SummaryFormatter {
    fn output<W: Write>(&self, writer: &mut W) -> Result<()>;
}

impl<T: SummaryFormatter> OutputFormat<T> for SummaryFormat {
    fn output<W: Write>(&self, writer: &mut W, data: &T) -> Result<()> {
        data.output(writer)
    }
}

/// One line per domain: `domain: rec1, rec2`.
impl<R: Display> SummaryFormatter for FinalMapping<R> {
    fn output<W: Write>(&self, writer: &mut W) -> Result<()> {
        for (domain, records) in self {
            let records: Vec<String> = records.iter().map(ToString::to_string).collect();
            writeln!(writer, "{}: {}", domain, records.join(", "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;

    #[test]
    fn one_line_per_domain() {
        let mut mapping: FinalMapping<&str> = FinalMapping::new();
        mapping.insert("a.com".to_string(), vec!["1.2.3.4", "5.6.7.8"]);
        mapping.insert("b.com".to_string(), Vec::new());

        let mut buf = Vec::new();
        let res = SummaryFormat::default().output(&mut buf, &mapping);

        assert_that(&res).is_ok();
        assert_that(&String::from_utf8(buf).expect("invalid utf8"))
            .is_equal_to("a.com: 1.2.3.4, 5.6.7.8\nb.com: \n".to_string());
    }
}
