use crate::domain::night::NightResult;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct NightOutcome {
    pub result: NightResult,
    /// Where the export landed; `None` on a dry run.
    pub output_path: Option<String>,
}

pub struct NightEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> NightEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&mut self) -> Result<NightOutcome> {
        let result = self.compute()?;

        tracing::info!("Saving roster and export files...");
        let output_path = self.pipeline.load(&result)?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(NightOutcome {
            result,
            output_path: Some(output_path),
        })
    }

    /// Extract and transform only. Nothing is written.
    pub fn dry_run(&mut self) -> Result<NightOutcome> {
        let result = self.compute()?;
        Ok(NightOutcome {
            result,
            output_path: None,
        })
    }

    fn compute(&mut self) -> Result<NightResult> {
        tracing::info!("Starting league night...");

        tracing::info!("Reading groups, scores and roster...");
        let input = self.pipeline.extract()?;
        tracing::info!(
            "Read {} groups and {} players",
            input.groups.len(),
            input.players.len()
        );

        tracing::info!("Planning flags and tags...");
        let result = self.pipeline.transform(input)?;
        tracing::info!(
            "Planned {} CTP flags, ranked {} players",
            result.flags.duties.len(),
            result.tags.len()
        );

        Ok(result)
    }
}
