use crate::gene::Gene;
use crate::genome::Genome;
use std::collections::HashMap;

impl<G: Gene> Genome<G> {
    /// Number of times `sym` is actually exercised when the genome is
    /// evaluated.
    ///
    /// This usually differs from the number of times the symbol appears in
    /// the Karva string, and makes a handy auxiliary fitness metric. The
    /// linking function fires once per gene boundary, so it contributes
    /// `genes.len() - 1` on top of whatever the genes themselves use.
    ///
    /// The counts are computed on the first call and cached for the life of
    /// the genome. Mutating the genes afterwards does not refresh them;
    /// build a new genome (or [`Genome::dup`] one) to recount.
    ///
    /// Counts are only meaningful for math genomes at the moment.
    pub fn symbol_count(&self, sym: &str) -> usize {
        self.symbol_map().get(sym).copied().unwrap_or(0)
    }

    /// The cached symbol -> usage count table behind [`Genome::symbol_count`]
    pub fn symbol_map(&self) -> &HashMap<String, usize> {
        self.symbol_map.get_or_init(|| {
            let mut counts = HashMap::new();
            counts.insert(self.link_func.clone(), self.genes.len().saturating_sub(1));
            for gene in &self.genes {
                merge(&mut counts, gene.symbol_map());
            }
            log::trace!("Symbol map for {}: {:?}", self, counts);
            counts
        })
    }
}

fn merge(dst: &mut HashMap<String, usize>, src: &HashMap<String, usize>) {
    for (symbol, count) in src {
        *dst.entry(symbol.clone()).or_insert(0) += count;
    }
}
