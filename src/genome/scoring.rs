use crate::error::GepError;
use crate::gene::{Gene, KarvaGene};
use crate::genome::Genome;
use std::fmt;
use std::sync::mpsc::{Sender, SyncSender};
use std::sync::Arc;
use thiserror::Error;

/// Fitness function for a genome.
///
/// By convention 0 means nowhere close to a solution and 1000 or more a
/// perfect one; the scale is up to the caller.
pub type ScoringFunc<G = KarvaGene> = Arc<dyn Fn(&Genome<G>) -> f64 + Send + Sync>;

/// A scored genome whose sink has no reader left. The genome, score
/// included, is handed back to the caller.
#[derive(Error)]
#[error("Result sink disconnected before the scored genome could be delivered")]
pub struct Undelivered<G: Gene = KarvaGene>(pub Genome<G>);

impl<G: Gene> Undelivered<G> {
    pub fn into_genome(self) -> Genome<G> {
        self.0
    }
}

impl<G: Gene> fmt::Debug for Undelivered<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Undelivered").field(&format_args!("{}", self.0)).finish()
    }
}

impl<G: Gene> From<Undelivered<G>> for GepError {
    fn from(_: Undelivered<G>) -> Self {
        GepError::SinkDisconnected
    }
}

/// Destination for scored genomes.
pub trait GenomeSink<G: Gene> {
    /// Hand the genome to the reader side. May block until a reader is
    /// ready, depending on the sink.
    fn deliver(&self, genome: Genome<G>) -> Result<(), Undelivered<G>>;
}

impl<G: Gene> GenomeSink<G> for Sender<Genome<G>> {
    fn deliver(&self, genome: Genome<G>) -> Result<(), Undelivered<G>> {
        self.send(genome).map_err(|err| Undelivered(err.0))
    }
}

/// A `sync_channel(0)` sender blocks until the reader takes the genome.
impl<G: Gene> GenomeSink<G> for SyncSender<Genome<G>> {
    fn deliver(&self, genome: Genome<G>) -> Result<(), Undelivered<G>> {
        self.send(genome).map_err(|err| Undelivered(err.0))
    }
}

impl<G: Gene> Genome<G> {
    /// Score the genome and send it to `sink`.
    ///
    /// The score is computed synchronously and stored in [`Genome::score`]
    /// before the genome is handed over. The only blocking point is the
    /// delivery itself.
    ///
    /// # Panics
    ///
    /// Panics when `scoring` is `None`. Evaluating without a scoring
    /// function is a programming error, and nothing is sent.
    ///
    /// # Errors
    ///
    /// [`Undelivered`] carries the scored genome back when the sink's reader
    /// is gone. It converts into [`GepError::SinkDisconnected`].
    pub fn evaluate<S>(
        mut self,
        scoring: Option<&ScoringFunc<G>>,
        sink: &S,
    ) -> Result<(), Undelivered<G>>
    where
        S: GenomeSink<G> + ?Sized,
    {
        let Some(scoring) = scoring else {
            log::error!("Genome::evaluate: ScoringFunc must not be None");
            panic!("Genome::evaluate: ScoringFunc must not be None");
        };
        self.score = scoring(&self);
        log::debug!("Scored {} -> {}", self, self.score);
        sink.deliver(self)
    }
}
