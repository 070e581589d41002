#![crate_name = "mendel"]
use log::{debug, trace};
use rand::Rng;
use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt;

pub mod prelude;

pub mod config;
pub mod error;
pub mod punnett;
pub mod records;

pub use config::{Locale, Simulator, SimulatorConfig};
pub use error::{Error, Result};

/// A single allele symbol. Uppercase is dominant, lowercase recessive.
pub type Allele = char;
pub type OffspringCount = usize;

/// The alleles a parent can pass on, each equally likely.
///
/// Any non-empty string is accepted: `"Rr"` is the usual heterozygous
/// parent, but longer or shorter pools are sampled the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllelePool {
    alleles: Vec<Allele>,
}

impl AllelePool {
    pub fn new(alleles: &str) -> Result<Self> {
        if alleles.is_empty() {
            return Err(Error::invalid("allele pool must not be empty"));
        }
        Ok(Self {
            alleles: alleles.chars().collect(),
        })
    }

    pub fn alleles(&self) -> &[Allele] {
        &self.alleles
    }

    /// Draws one allele uniformly at random.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Allele {
        self.alleles[rng.gen_range(0..self.alleles.len())]
    }

    /// Probability of drawing each distinct allele.
    pub fn frequencies(&self) -> BTreeMap<Allele, f64> {
        let total = self.alleles.len() as f64;
        self.alleles
            .iter()
            .fold(BTreeMap::new(), |mut freqs, allele| {
                *freqs.entry(*allele).or_insert(0.0) += 1.0 / total;
                freqs
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phenotype {
    Dominant,
    Recessive,
}

impl Phenotype {
    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Phenotype::Dominant, Locale::English) => "dominant",
            (Phenotype::Recessive, Locale::English) => "recessive",
            (Phenotype::Dominant, Locale::Korean) => "우성",
            (Phenotype::Recessive, Locale::Korean) => "열성",
        }
    }
}

/// A pair of alleles stored in ascending character order, so `rR` and
/// `Rr` are the same genotype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Genotype([Allele; 2]);

impl Genotype {
    pub fn new(a: Allele, b: Allele) -> Self {
        if a <= b {
            Self([a, b])
        } else {
            Self([b, a])
        }
    }

    pub fn alleles(&self) -> (Allele, Allele) {
        (self.0[0], self.0[1])
    }

    /// Dominant when either allele is uppercase.
    ///
    /// Only the case is checked, so a cross between unrelated trait
    /// letters still gets classified.
    pub fn phenotype(&self) -> Phenotype {
        if self.0.iter().any(|allele| allele.is_uppercase()) {
            Phenotype::Dominant
        } else {
            Phenotype::Recessive
        }
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0[0], self.0[1])
    }
}

impl Serialize for Genotype {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Count of offspring per observed genotype.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenotypeTally(BTreeMap<Genotype, OffspringCount>);

impl GenotypeTally {
    pub fn get(&self, genotype: &Genotype) -> Option<OffspringCount> {
        self.0.get(genotype).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Genotype, &OffspringCount)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> OffspringCount {
        self.0.values().sum()
    }

    /// One `(label, count)` row per genotype, ready for a bar chart.
    pub fn rows(&self) -> Vec<(String, OffspringCount)> {
        self.0
            .iter()
            .map(|(genotype, count)| (genotype.to_string(), *count))
            .collect()
    }
}

impl fmt::Display for GenotypeTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (genotype, count) in self.0.iter() {
            writeln!(f, "{}: {}", genotype, count)?;
        }
        Ok(())
    }
}

/// Dominant and recessive counts. Both are always present.
///
/// Serializes with the fixed keys `dominant` and `recessive` whatever the
/// locale; `rows` and `display` carry the localized labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhenotypeTally {
    dominant: OffspringCount,
    recessive: OffspringCount,
}

impl PhenotypeTally {
    fn record(&mut self, phenotype: Phenotype) {
        match phenotype {
            Phenotype::Dominant => self.dominant += 1,
            Phenotype::Recessive => self.recessive += 1,
        }
    }

    pub fn get(&self, phenotype: Phenotype) -> OffspringCount {
        match phenotype {
            Phenotype::Dominant => self.dominant,
            Phenotype::Recessive => self.recessive,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Phenotype, OffspringCount)> {
        vec![
            (Phenotype::Dominant, self.dominant),
            (Phenotype::Recessive, self.recessive),
        ]
        .into_iter()
    }

    pub fn total(&self) -> OffspringCount {
        self.dominant + self.recessive
    }

    pub fn rows(&self, locale: Locale) -> Vec<(String, OffspringCount)> {
        self.iter()
            .map(|(phenotype, count)| (phenotype.label(locale).to_owned(), count))
            .collect()
    }

    /// Renders `label: count` lines using the given locale's labels.
    pub fn display(&self, locale: Locale) -> String {
        self.iter()
            .map(|(phenotype, count)| format!("{}: {}\n", phenotype.label(locale), count))
            .collect()
    }
}

impl fmt::Display for PhenotypeTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display(Locale::English))
    }
}

/// The reduced result of one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Simulation {
    pub genotypes: GenotypeTally,
    pub phenotypes: PhenotypeTally,
}

impl Simulation {
    pub fn offspring(&self) -> OffspringCount {
        self.phenotypes.total()
    }

    /// Genotype rows followed by phenotype rows, one bar each.
    pub fn bars(&self, locale: Locale) -> Vec<(String, OffspringCount)> {
        self.genotypes
            .rows()
            .into_iter()
            .chain(self.phenotypes.rows(locale))
            .collect()
    }
}

/// Folds an offspring population into its genotype and phenotype tallies.
pub fn tabulate<I>(population: I) -> Simulation
where
    I: IntoIterator,
    I::Item: Borrow<Genotype>,
{
    let (genotypes, phenotypes) = population.into_iter().fold(
        (BTreeMap::new(), PhenotypeTally::default()),
        |(mut genotypes, mut phenotypes), genotype| {
            let genotype = *Borrow::<Genotype>::borrow(&genotype);
            *genotypes.entry(genotype).or_insert(0) += 1;
            phenotypes.record(genotype.phenotype());
            (genotypes, phenotypes)
        },
    );
    Simulation {
        genotypes: GenotypeTally(genotypes),
        phenotypes,
    }
}

/// A pairing of two parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cross {
    parent1: AllelePool,
    parent2: AllelePool,
}

impl Cross {
    pub fn new(parent1: &str, parent2: &str) -> Result<Self> {
        Ok(Self {
            parent1: AllelePool::new(parent1)?,
            parent2: AllelePool::new(parent2)?,
        })
    }

    pub fn parent1(&self) -> &AllelePool {
        &self.parent1
    }

    pub fn parent2(&self) -> &AllelePool {
        &self.parent2
    }

    /// Produces a single offspring, one allele drawn from each parent.
    pub fn offspring<R: Rng + ?Sized>(&self, rng: &mut R) -> Genotype {
        Genotype::new(self.parent1.sample(rng), self.parent2.sample(rng))
    }

    /// Produces `n` independent offspring.
    pub fn population<R: Rng + ?Sized>(&self, n: OffspringCount, rng: &mut R) -> Vec<Genotype> {
        (0..n).map(|_| self.offspring(rng)).collect()
    }
}

/// Simulates `n` offspring of `parent1` x `parent2` and tabulates them.
///
/// Fails with `Error::InvalidInput` if either parent is empty or `n` is
/// negative. `n == 0` yields an empty genotype tally and zero phenotype
/// counts.
pub fn simulate<R: Rng + ?Sized>(
    parent1: &str,
    parent2: &str,
    n: i64,
    rng: &mut R,
) -> Result<Simulation> {
    let cross = Cross::new(parent1, parent2)?;
    let n = OffspringCount::try_from(n).map_err(|_| {
        Error::invalid(format!(
            "offspring count must be a non-negative machine-sized integer, got {}",
            n
        ))
    })?;
    debug!("simulating {} offspring of {} x {}", n, parent1, parent2);

    let simulation = tabulate((0..n).map(|_| cross.offspring(rng)));
    trace!(
        "genotypes: {:?}, phenotypes: {:?}",
        simulation.genotypes,
        simulation.phenotypes
    );
    Ok(simulation)
}

/// `simulate` drawing from the thread-local generator.
pub fn simulate_with_entropy(parent1: &str, parent2: &str, n: i64) -> Result<Simulation> {
    simulate(parent1, parent2, n, &mut rand::thread_rng())
}
