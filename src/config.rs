use crate::prelude::*;
use log::{debug, warn};
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::convert::TryFrom;
use std::ops::RangeInclusive;

/// Language used for phenotype labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    English,
    Korean,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::English
    }
}

/// Deployment policy around `simulate`.
///
/// The core operation accepts any non-negative count; an application
/// typically narrows that to what its form allows.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub min_offspring: OffspringCount,
    pub max_offspring: OffspringCount,
    pub locale: Locale,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            min_offspring: 50,
            max_offspring: 500,
            locale: Locale::default(),
        }
    }
}

impl SimulatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offspring_range(&mut self, range: RangeInclusive<OffspringCount>) -> &mut Self {
        self.min_offspring = *range.start();
        self.max_offspring = *range.end();
        self
    }

    pub fn locale(&mut self, locale: Locale) -> &mut Self {
        self.locale = locale;
        self
    }

    /// Checks `n` against the allowed offspring range.
    pub fn check(&self, n: i64) -> Result<()> {
        let allowed = self.min_offspring..=self.max_offspring;
        if !OffspringCount::try_from(n).map_or(false, |n| allowed.contains(&n)) {
            warn!(
                "rejected offspring count {} outside {}..={}",
                n, self.min_offspring, self.max_offspring
            );
            return Err(Error::invalid(format!(
                "offspring count {} outside of allowed range {}..={}",
                n, self.min_offspring, self.max_offspring
            )));
        }
        Ok(())
    }
}

/// Runs simulations under a `SimulatorConfig`, owning its random source.
pub struct Simulator<R: Rng> {
    config: SimulatorConfig,
    rng: R,
}

impl Simulator<ThreadRng> {
    pub fn new(config: SimulatorConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl Simulator<StdRng> {
    /// A simulator whose runs are reproducible for a given seed.
    pub fn seeded(config: SimulatorConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulator<R> {
    pub fn with_rng(config: SimulatorConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn run(&mut self, parent1: &str, parent2: &str, n: i64) -> Result<Simulation> {
        self.config.check(n)?;
        let simulation = simulate(parent1, parent2, n, &mut self.rng)?;
        debug!(
            "{} x {}: {}",
            parent1,
            parent2,
            simulation.phenotypes.display(self.config.locale).trim_end()
        );
        Ok(simulation)
    }

    /// Runs a request read from a table.
    pub fn run_request(&mut self, request: &CrossRequest) -> Result<Simulation> {
        self.run(&request.parent1, &request.parent2, request.offspring)
    }
}
