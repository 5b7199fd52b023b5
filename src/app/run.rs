// Copyright 2017-2021 Lukas Pustina <lukas@pustina.de>
//
// Licensed under the Apache License, Version 2.0, <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::app::output::{Output, OutputConfig, OutputFormat};
use crate::app::{AppConfig, ExitStatus};
use crate::concurrence::Strategy;
use crate::estimate::Estimate;
use crate::fold::ConcatFold;
use crate::nameserver::{predefined, NameServer, NameServerGroup};
use crate::preprocess::WwwVariants;
use crate::resolver::{Backend, HickoryBackend, QueryOpts, Resolver, ResolverOpts};

pub fn run(config: &AppConfig) -> Result<ExitStatus> {
    if config.list_predefined {
        list_predefined_nameservers()?;
        return Ok(ExitStatus::Ok);
    }

    let opts = load_resolver_opts(config)?;
    let strategy = Strategy::new(config.mode, config.threads).context("failed to create execution strategy")?;
    let backend = HickoryBackend::new().context("failed to create DNS backend")?;
    let resolver = create_resolver(config, backend, strategy, opts);
    let query_opts = QueryOpts::new(config.record_types.clone());
    info!(
        "Resolving {} domains with {} nameservers, {} tries, {} mode.",
        config.domains.len(),
        resolver.opts().name_servers.len(),
        resolver.opts().tries,
        resolver.concurrence().mode()
    );

    if config.estimate {
        let estimation = resolver.estimate(config.domains.len(), &query_opts);
        eprintln!("Estimated {}", estimation);
    }

    let start_time = Instant::now();
    let mapping = resolver.resolve(&config.domains, &query_opts).context("failed to resolve")?;
    let total_run_time = Instant::now() - start_time;
    info!("Resolved within {} ms of total run time.", total_run_time.as_millis());

    let mapping = mapping.unwrap_or_default();
    let output_config = OutputConfig::from(config.output);
    let output = Output::new(&output_config);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    output
        .output(&mut handle, &mapping)
        .context("failed to print results to stdout")?;

    Ok(ExitStatus::Ok)
}

fn load_resolver_opts(config: &AppConfig) -> Result<ResolverOpts> {
    let mut opts = if config.use_system_resolv_opt {
        ResolverOpts::from_system_config_path(&config.resolv_conf_path)
            .with_context(|| format!("failed to load resolver options from '{}'", config.resolv_conf_path))?
    } else {
        ResolverOpts::default()
    };
    if let Some(tries) = config.tries {
        opts.tries = tries;
    }
    if let Some(lifetime) = config.lifetime {
        opts.lifetime = lifetime;
    }
    opts.name_servers = load_name_servers(config)?;
    debug!("Using resolver opts {:?}.", opts);

    Ok(opts)
}

fn load_name_servers(config: &AppConfig) -> Result<Vec<NameServer>> {
    let mut name_servers = NameServerGroup::new(config.nameservers.clone());

    if config.use_system_nameservers {
        let system = NameServerGroup::from_system_config_path(&config.resolv_conf_path)
            .with_context(|| format!("failed to load nameservers from '{}'", config.resolv_conf_path))?;
        debug!("Loaded {} system nameservers.", system.len());
        name_servers.merge(system);
    }
    if config.predefined {
        name_servers.merge(NameServerGroup::new(predefined::name_servers()));
    }

    if name_servers.is_empty() {
        debug!("No nameservers configured; using defaults.");
        Ok(predefined::default_name_servers())
    } else {
        Ok(name_servers.into())
    }
}

fn create_resolver<B: Backend>(
    config: &AppConfig,
    backend: B,
    strategy: Strategy,
    opts: ResolverOpts,
) -> Resolver<B> {
    let mut resolver = Resolver::new(backend, strategy, opts);
    if !config.dedup {
        resolver = resolver.with_fold(ConcatFold);
    }
    if config.www {
        resolver = resolver.with_preprocessor(WwwVariants);
    }

    resolver
}

fn list_predefined_nameservers() -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "List of predefined servers:")?;
    for ns in predefined::name_servers() {
        writeln!(handle, "* {}", ns)?;
    }

    Ok(())
}
