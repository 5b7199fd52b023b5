// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use indexmap::IndexSet;

/// Transforms the domain list before attempts are planned.
pub trait Preprocess: Send + Sync {
    fn preprocess(&self, domains: Vec<String>) -> Vec<String>;
}

impl<F> Preprocess for F
where
    F: Fn(Vec<String>) -> Vec<String> + Send + Sync,
{
    fn preprocess(&self, domains: Vec<String>) -> Vec<String> {
        self(domains)
    }
}

/// Adds `www.<domain>` for every domain that is not a `www.` name already.
#[derive(Debug, Default, Clone, Copy)]
pub struct WwwVariants;

static WWW: &str = "www.";

impl Preprocess for WwwVariants {
    fn preprocess(&self, domains: Vec<String>) -> Vec<String> {
        let variants: Vec<String> = domains
            .iter()
            .filter(|domain| !domain.starts_with(WWW))
            .map(|domain| format!("{}{}", WWW, domain))
            .collect();

        let domains: IndexSet<String> = domains.into_iter().chain(variants).collect();
        domains.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use spectral::prelude::*;

    fn domains(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn www_variants_are_appended() {
        let preprocessed = WwwVariants.preprocess(domains(&["example.com", "example.net"]));

        assert_that(&preprocessed).is_equal_to(domains(&[
            "example.com",
            "example.net",
            "www.example.com",
            "www.example.net",
        ]));
    }

    #[test]
    fn www_names_are_not_doubled() {
        let preprocessed = WwwVariants.preprocess(domains(&["www.example.com", "example.com"]));

        assert_that(&preprocessed).is_equal_to(domains(&["www.example.com", "example.com"]));
    }
}
