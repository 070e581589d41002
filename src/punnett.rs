use crate::prelude::*;
use ndarray;
use std::collections::BTreeMap;

/// Expected outcome of a cross.
///
/// Rows are the distinct alleles of parent 1, columns those of parent 2,
/// and each cell holds the probability of that allele pair.
pub struct PunnettSquare {
    rows: Vec<Allele>,
    cols: Vec<Allele>,
    probabilities: ndarray::Array2<f64>,
}

impl PunnettSquare {
    pub fn new(cross: &Cross) -> Self {
        let (rows, row_freqs): (Vec<Allele>, Vec<f64>) =
            cross.parent1().frequencies().into_iter().unzip();
        let (cols, col_freqs): (Vec<Allele>, Vec<f64>) =
            cross.parent2().frequencies().into_iter().unzip();

        let probabilities =
            ndarray::Array2::from_shape_fn((rows.len(), cols.len()), |(i, j)| {
                row_freqs[i] * col_freqs[j]
            });

        Self {
            rows,
            cols,
            probabilities,
        }
    }

    pub fn rows(&self) -> &[Allele] {
        &self.rows
    }

    pub fn cols(&self) -> &[Allele] {
        &self.cols
    }

    pub fn probabilities(&self) -> &ndarray::Array2<f64> {
        &self.probabilities
    }

    /// Genotype of the cell at `(row, col)`.
    pub fn genotype(&self, row: usize, col: usize) -> Option<Genotype> {
        Some(Genotype::new(*self.rows.get(row)?, *self.cols.get(col)?))
    }

    /// Probability of each genotype the cross can produce. Sums to 1.
    pub fn expected_genotypes(&self) -> BTreeMap<Genotype, f64> {
        self.probabilities
            .indexed_iter()
            .fold(BTreeMap::new(), |mut expected, ((i, j), p)| {
                *expected
                    .entry(Genotype::new(self.rows[i], self.cols[j]))
                    .or_insert(0.0) += *p;
                expected
            })
    }

    /// `(dominant, recessive)` probabilities.
    pub fn expected_phenotypes(&self) -> (f64, f64) {
        self.expected_genotypes()
            .iter()
            .fold((0.0, 0.0), |(dominant, recessive), (genotype, p)| {
                match genotype.phenotype() {
                    Phenotype::Dominant => (dominant + p, recessive),
                    Phenotype::Recessive => (dominant, recessive + p),
                }
            })
    }

    /// Pearson's chi-square statistic of `observed` against this square.
    ///
    /// Degrees of freedom are one less than the number of expected
    /// genotypes.
    pub fn chi_square(&self, observed: &GenotypeTally) -> Result<f64> {
        let n = observed.total() as f64;
        if observed.is_empty() {
            return Err(Error::invalid("cannot test an empty tally"));
        }

        let expected = self.expected_genotypes();
        for (genotype, _) in observed.iter() {
            if !expected.contains_key(genotype) {
                return Err(Error::invalid(format!(
                    "genotype {} cannot arise from this cross",
                    genotype
                )));
            }
        }

        Ok(expected
            .iter()
            .map(|(genotype, p)| {
                let e = p * n;
                let o = observed.get(genotype).unwrap_or(0) as f64;
                (o - e).powf(2.0) / e
            })
            .sum())
    }
}
