use std::cell::RefCell;
use std::io::{BufRead, Write};

use ephemeris::ObserverLocation;

use super::{LocationError, LocationProvider, LocationSource, ResolvedLocation};

/// Ask for coordinates on a line-oriented terminal.
pub struct InteractivePrompt<R: BufRead, W: Write> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl InteractivePrompt<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> InteractivePrompt<R, W> {
    pub const DEFAULT_NAME: &'static str = "Manual Location";

    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    fn ask(&self, prompt: &str) -> Result<String, LocationError> {
        let io_err = |e: std::io::Error| LocationError::Input(e.to_string());
        {
            let mut out = self.output.borrow_mut();
            out.write_all(prompt.as_bytes()).map_err(io_err)?;
            out.flush().map_err(io_err)?;
        }
        let mut line = String::new();
        let read = self.input.borrow_mut().read_line(&mut line).map_err(io_err)?;
        if read == 0 {
            return Err(LocationError::Input("unexpected end of input".to_string()));
        }
        Ok(line.trim().to_string())
    }

    fn ask_number(&self, prompt: &str, what: &str) -> Result<f64, LocationError> {
        let answer = self.ask(prompt)?;
        answer
            .parse::<f64>()
            .map_err(|_| LocationError::Input(format!("{what} '{answer}' is not a number")))
    }
}

impl<R: BufRead, W: Write> LocationProvider for InteractivePrompt<R, W> {
    fn name(&self) -> &str {
        "interactive prompt"
    }

    fn locate(&self) -> Result<ResolvedLocation, LocationError> {
        let latitude = self.ask_number("Enter your latitude (e.g., 40.7128): ", "latitude")?;
        let longitude = self.ask_number("Enter your longitude (e.g., -74.0060): ", "longitude")?;
        let city = self.ask("Enter your city name (optional): ")?;
        Ok(ResolvedLocation {
            location: ObserverLocation::new(latitude, longitude, 0.0)?,
            display_name: Some(if city.is_empty() {
                Self::DEFAULT_NAME.to_string()
            } else {
                city
            }),
            country: None,
            source: LocationSource::Interactive,
        })
    }
}
