use crate::prelude::*;
use csv;
use std::io::{Read, Write};

/// One row of a batch of crosses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossRequest {
    pub parent1: String,
    pub parent2: String,
    pub offspring: i64,
}

#[derive(Clone, Copy)]
struct Columns {
    parent1: usize,
    parent2: usize,
    offspring: usize,
}

/// Produces `CrossRequest`s from delimited data
///
/// `CrossReader` implements Iterator so it can be fed row by row
/// to `Simulator::run_request()`.
pub struct CrossReader {
    records: std::iter::Enumerate<csv::StringRecordsIntoIter<Box<dyn Read>>>,
    columns: Columns,
    first_line: usize,
}

impl CrossReader {
    fn parse(&self, line: usize, row: &csv::StringRecord) -> Result<CrossRequest> {
        let field = |idx: usize, name: &str| {
            row.get(idx)
                .map(|f| f.trim().to_owned())
                .ok_or_else(|| Error::invalid(format!("line {}: missing {} column", line, name)))
        };

        let parent1 = field(self.columns.parent1, "parent1")?;
        let parent2 = field(self.columns.parent2, "parent2")?;
        let offspring = field(self.columns.offspring, "offspring")?;
        let offspring = offspring.parse::<i64>().map_err(|_| {
            Error::invalid(format!(
                "line {}: offspring count {:?} is not an integer",
                line, offspring
            ))
        })?;

        Ok(CrossRequest {
            parent1,
            parent2,
            offspring,
        })
    }
}

impl Iterator for CrossReader {
    type Item = Result<CrossRequest>;

    fn next(&mut self) -> Option<Result<CrossRequest>> {
        let (idx, record) = self.records.next()?;
        let line = idx + self.first_line;
        Some(
            record
                .map_err(Error::from)
                .and_then(|row| self.parse(line, &row)),
        )
    }
}

pub struct CrossReaderBuilder {
    headers: bool,
    delimiter: u8,
    parent1_field: String,
    parent2_field: String,
    offspring_field: String,
}

impl CrossReaderBuilder {
    /// Construct a new reader builder
    ///
    /// By default the input has a header row naming the
    /// `parent1`, `parent2` and `offspring` columns.
    pub fn new() -> Self {
        Self {
            headers: true,
            delimiter: b',',
            parent1_field: "parent1".to_owned(),
            parent2_field: "parent2".to_owned(),
            offspring_field: "offspring".to_owned(),
        }
    }

    /// Without headers the first three columns are read in order.
    pub fn headers(&mut self, headers: bool) -> &mut Self {
        self.headers = headers;
        self
    }

    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    pub fn parent1_field(&mut self, name: &str) -> &mut Self {
        self.parent1_field = name.to_owned();
        self
    }

    pub fn parent2_field(&mut self, name: &str) -> &mut Self {
        self.parent2_field = name.to_owned();
        self
    }

    pub fn offspring_field(&mut self, name: &str) -> &mut Self {
        self.offspring_field = name.to_owned();
        self
    }

    pub fn from_reader(&self, reader: Box<dyn Read>) -> Result<CrossReader> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(self.headers)
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(reader);

        let columns = if self.headers {
            let headers = rdr.headers()?;
            let position = |name: &str| {
                headers
                    .iter()
                    .position(|h| h.trim() == name)
                    .ok_or_else(|| Error::invalid(format!("no {:?} column in header", name)))
            };
            Columns {
                parent1: position(&self.parent1_field)?,
                parent2: position(&self.parent2_field)?,
                offspring: position(&self.offspring_field)?,
            }
        } else {
            Columns {
                parent1: 0,
                parent2: 1,
                offspring: 2,
            }
        };

        Ok(CrossReader {
            records: rdr.into_records().enumerate(),
            columns,
            first_line: if self.headers { 2 } else { 1 },
        })
    }
}

impl Default for CrossReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes `label,count` rows, after a header, for a charting collaborator.
pub fn write_tally<W, I, L>(rows: I, writer: W) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = (L, OffspringCount)>,
    L: AsRef<str>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&["label", "count"])?;
    for (label, count) in rows {
        let count = count.to_string();
        wtr.write_record(&[label.as_ref(), count.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::error::Error as StdError;

    fn read(input: &'static str, builder: &CrossReaderBuilder) -> Result<Vec<Result<CrossRequest>>> {
        Ok(builder.from_reader(Box::new(input.as_bytes()))?.collect())
    }

    #[test]
    fn test_reads_requests_by_header_name() -> std::result::Result<(), Box<dyn StdError>> {
        let rows = read(
            "offspring,parent2,parent1\n100,rr,RR\n50, Rr ,Rr\n",
            &CrossReaderBuilder::new(),
        )?;
        let requests = rows.into_iter().collect::<Result<Vec<_>>>()?;
        assert_eq!(
            requests,
            vec![
                CrossRequest {
                    parent1: "RR".into(),
                    parent2: "rr".into(),
                    offspring: 100
                },
                CrossRequest {
                    parent1: "Rr".into(),
                    parent2: "Rr".into(),
                    offspring: 50
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_reads_headerless_tab_delimited() -> std::result::Result<(), Box<dyn StdError>> {
        let rows = read(
            "Rr\trr\t10\n",
            CrossReaderBuilder::new().headers(false).delimiter(b'\t'),
        )?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.into_iter().next().ok_or("no row")??.offspring, 10);
        Ok(())
    }

    #[test]
    fn test_malformed_count_is_reported_with_line() -> std::result::Result<(), Box<dyn StdError>> {
        let rows = read(
            "parent1,parent2,offspring\nRr,Rr,ten\nRr,Rr\n",
            &CrossReaderBuilder::new(),
        )?;
        let messages: Vec<String> = rows
            .into_iter()
            .map(|row| match row {
                Err(Error::InvalidInput(msg)) => msg,
                other => format!("unexpected {:?}", other),
            })
            .collect();
        assert!(messages[0].starts_with("line 2"));
        assert!(messages[1].contains("missing offspring"));
        Ok(())
    }

    #[test]
    fn test_missing_header_column_is_rejected() {
        let result = CrossReaderBuilder::new()
            .parent1_field("mother")
            .from_reader(Box::new("parent1,parent2,offspring\n".as_bytes()));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_requests_run_through_simulator() -> std::result::Result<(), Box<dyn StdError>> {
        let mut simulator = Simulator::seeded(SimulatorConfig::default(), 3);
        for request in
            CrossReaderBuilder::new().from_reader(Box::new("parent1,parent2,offspring\nRR,rr,80\n".as_bytes()))?
        {
            let simulation = simulator.run_request(&request?)?;
            assert_eq!(simulation.genotypes.get(&Genotype::new('R', 'r')), Some(80));
        }
        Ok(())
    }

    #[test]
    fn test_writes_tally_table() -> std::result::Result<(), Box<dyn StdError>> {
        let simulation = simulate("RR", "rr", 4, &mut StdRng::seed_from_u64(0))?;

        let mut out = vec![];
        write_tally(simulation.genotypes.rows(), &mut out)?;
        assert_eq!(String::from_utf8(out)?, "label,count\nRr,4\n");

        let mut out = vec![];
        write_tally(simulation.phenotypes.rows(Locale::Korean), &mut out)?;
        assert_eq!(String::from_utf8(out)?, "label,count\n우성,4\n열성,0\n");
        Ok(())
    }
}
