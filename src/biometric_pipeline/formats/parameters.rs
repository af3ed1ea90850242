//! Source/target conversion parameters.
//!
//! Recognized keys are parsed and carried through the pipeline. No stage
//! resizes or resamples from them yet.

use std::collections::BTreeMap;

use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterCode {
    Dpi,
    Width,
    Height,
}

impl ParameterCode {
    pub const ALL: [ParameterCode; 3] = [ParameterCode::Dpi, ParameterCode::Width, ParameterCode::Height];

    pub const fn code(&self) -> &'static str {
        match self {
            ParameterCode::Dpi => "dpi",
            ParameterCode::Width => "width",
            ParameterCode::Height => "height",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            ParameterCode::Dpi => "image Dots Per Inch",
            ParameterCode::Width => "image width",
            ParameterCode::Height => "image height",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|param| param.code().eq_ignore_ascii_case(code))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageParameters {
    pub dpi: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ImageParameters {
    /// Collects recognized numeric parameters. Unknown keys and values that
    /// are not unsigned integers are skipped.
    pub fn from_map(params: Option<&BTreeMap<String, String>>) -> Self {
        let mut parsed = ImageParameters::default();
        let Some(params) = params else {
            return parsed;
        };

        for (key, value) in params {
            let Some(code) = ParameterCode::from_code(key) else {
                warn!(parameter = %key, "Ignoring unknown conversion parameter");
                continue;
            };
            let Ok(number) = value.trim().parse::<u32>() else {
                warn!(parameter = code.code(), value = %value, "Ignoring non-numeric conversion parameter");
                continue;
            };
            match code {
                ParameterCode::Dpi => parsed.dpi = Some(number),
                ParameterCode::Width => parsed.width = Some(number),
                ParameterCode::Height => parsed.height = Some(number),
            }
        }

        parsed
    }

    pub fn is_empty(&self) -> bool {
        self.dpi.is_none() && self.width.is_none() && self.height.is_none()
    }
}
