use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use citypath_core::NodeIndex;
use citypath_ingest::{lookup, IngestError, Region};

/// Console dialogue for picking a state, a start city and destinations.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and read one trimmed line. Fails on end of input.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed while waiting for an answer");
        }
        Ok(line.trim().to_string())
    }

    fn list(&mut self, heading: &str, names: &[String]) -> Result<()> {
        writeln!(self.output, "{}", heading)?;
        for (i, name) in names.iter().enumerate() {
            writeln!(self.output, "\t{}. {}", i + 1, name)?;
        }
        Ok(())
    }

    /// Ask until `parse` accepts the answer; lookup errors are shown and retried.
    fn ask_until<T>(
        &mut self,
        question: &str,
        mut parse: impl FnMut(&str) -> std::result::Result<T, IngestError>,
    ) -> Result<T> {
        loop {
            let answer = self.ask(question)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "{}, try again.", e)?,
            }
        }
    }

    pub fn choose_state(&mut self, states: &[String]) -> Result<String> {
        if states.is_empty() {
            bail!("no states available");
        }
        self.list("Available states:", states)?;
        let index = self.ask_until(
            "Choose the state you plan to travel in (row number or name): ",
            |answer| {
                lookup(states, answer).ok_or_else(|| IngestError::UnknownState(answer.to_string()))
            },
        )?;
        let state = states[index].clone();
        writeln!(self.output, "You chose: {}", state)?;
        Ok(state)
    }

    pub fn choose_start(&mut self, region: &Region) -> Result<NodeIndex> {
        self.list("Available cities:", &region.cities)?;
        let start = self.ask_until(
            "Which city would you like to start from? Enter its row number: ",
            |answer| region.city_index(answer),
        )?;
        writeln!(self.output, "Starting from: {}", region.cities[start])?;
        Ok(start)
    }

    pub fn choose_destinations(&mut self, region: &Region) -> Result<Vec<NodeIndex>> {
        let picked = self.ask_until(
            "Which cities would you like to visit? Enter row numbers separated by commas: ",
            |answer| region.city_indices(answer),
        )?;
        writeln!(self.output, "You would like to visit:")?;
        for (i, &city) in picked.iter().enumerate() {
            writeln!(self.output, "\t{}. {}", i + 1, region.cities[city])?;
        }
        Ok(picked)
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citypath_ingest::parse_region;

    fn region() -> Region {
        parse_region(
            "Goa",
            "Goa,Panaji,Margao,Vasco\nPanaji,0,33,-1\nMargao,33,0,29\nVasco,-1,29,0\n".as_bytes(),
        )
        .unwrap()
    }

    fn prompter(input: &str) -> Prompter<&[u8], Vec<u8>> {
        Prompter::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn choose_state_by_number() {
        let states = vec!["India".to_string(), "Goa".to_string()];
        let mut p = prompter("2\n");
        assert_eq!(p.choose_state(&states).unwrap(), "Goa");

        let out = String::from_utf8(p.output().clone()).unwrap();
        assert!(out.contains("\t1. India"));
        assert!(out.contains("You chose: Goa"));
    }

    #[test]
    fn retries_after_bad_answer() {
        let mut p = prompter("9\nmargao\n");
        assert_eq!(p.choose_start(&region()).unwrap(), 1);
        let out = String::from_utf8(p.output().clone()).unwrap();
        assert!(out.contains("try again"));
    }

    #[test]
    fn destinations_comma_list() {
        let mut p = prompter("3, 1\n");
        assert_eq!(p.choose_destinations(&region()).unwrap(), vec![2, 0]);
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut p = prompter("");
        assert!(p.choose_start(&region()).is_err());
    }
}
