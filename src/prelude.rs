pub use crate::config::{Locale, Simulator, SimulatorConfig};
pub use crate::error::{Error, Result};
pub use crate::punnett::PunnettSquare;
pub use crate::records::{write_tally, CrossReader, CrossReaderBuilder, CrossRequest};
pub use crate::{
    simulate, simulate_with_entropy, tabulate, Allele, AllelePool, Cross, Genotype, GenotypeTally,
    OffspringCount, Phenotype, PhenotypeTally, Simulation,
};
