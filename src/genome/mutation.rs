use crate::config::MutationConfig;
use crate::gene::Gene;
use crate::genome::Genome;
use rand::Rng;
use std::sync::OnceLock;

impl<G: Gene> Genome<G> {
    /// Perform `num_mutations` random symbol exchanges.
    ///
    /// Each round picks a gene uniformly at random (the same gene may be
    /// picked more than once) and lets that gene mutate itself. Gene count
    /// and order never change.
    pub fn mutate<R: Rng>(&mut self, num_mutations: usize, rng: &mut R) {
        if self.genes.is_empty() {
            log::warn!("Genome::mutate called on a genome without genes");
            return;
        }
        for _ in 0..num_mutations {
            let n = rng.gen_range(0..self.genes.len());
            log::debug!("Mutating gene #{}, before: {}", n, self.genes[n]);
            self.genes[n].mutate(rng);
            log::debug!("Mutating gene #{}, after: {}", n, self.genes[n]);
        }
    }

    /// Mutate using the round count from `config`.
    ///
    /// `rng` is owned by the caller and should be built once per run with
    /// [`MutationConfig::rng`], so a seeded run stays reproducible while
    /// successive calls still draw different exchanges.
    pub fn mutate_with_config<R: Rng>(&mut self, config: &MutationConfig, rng: &mut R) {
        self.mutate(config.num_mutations, rng);
    }

    /// Deep copy of the genome: same linking function and score, every gene
    /// duplicated. The symbol count cache is not carried over.
    pub fn dup(&self) -> Self {
        Self {
            genes: self.genes.iter().map(Gene::dup).collect(),
            link_func: self.link_func.clone(),
            score: self.score,
            symbol_map: OnceLock::new(),
        }
    }

    /// [`Genome::dup`] for a source that may be absent. An absent source is
    /// logged and produces no copy.
    pub fn dup_opt(src: Option<&Self>) -> Option<Self> {
        match src {
            Some(genome) => Some(genome.dup()),
            None => {
                log::warn!("Genome::dup_opt: source genome must be present");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::MutationConfig;
    use crate::gene::KarvaGene;
    use crate::genome::test_support::FixedGene;
    use crate::genome::Genome;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn three_genes() -> Genome<FixedGene> {
        let genes = vec![FixedGene::new("a"), FixedGene::new("b"), FixedGene::new("c")];
        Genome::new(genes, "+").unwrap()
    }

    #[test]
    fn test_mutate_issues_exact_number_of_gene_mutations() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut genome = three_genes();
        genome.mutate(100, &mut rng);

        let total: usize = genome.genes.iter().map(|g| g.mutations).sum();
        assert_eq!(total, 100);
        assert_eq!(genome.genes.len(), 3);
        // 100 uniform picks over 3 genes hit every gene
        assert!(genome.genes.iter().all(|g| g.mutations > 0));
    }

    #[test]
    fn test_mutate_zero_is_noop() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut genome = three_genes();
        genome.mutate(0, &mut rng);
        assert!(genome.genes.iter().all(|g| g.mutations == 0));
        assert_eq!(genome.to_string(), "a|+|b|+|c");
    }

    fn karva_template() -> Genome {
        let genes = vec![
            KarvaGene::math("*.d0.d0.d0.d0").unwrap(),
            KarvaGene::math("+.d1.d1.d1.d1").unwrap(),
        ];
        Genome::new(genes, "-").unwrap()
    }

    fn offspring(config: &MutationConfig, count: usize) -> Vec<String> {
        let mut rng = config.rng();
        let template = karva_template();
        (0..count)
            .map(|_| {
                let mut child = template.dup();
                child.mutate_with_config(config, &mut rng);
                child.to_string()
            })
            .collect()
    }

    #[test]
    fn test_mutate_with_config_uses_round_count() {
        let config = MutationConfig {
            num_mutations: 10,
            seed: Some(99),
        };
        let mut genome = three_genes();
        genome.mutate_with_config(&config, &mut config.rng());
        let total: usize = genome.genes.iter().map(|g| g.mutations).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn test_seeded_offspring_differ_but_reseeded_run_reproduces() {
        let config = MutationConfig {
            num_mutations: 3,
            seed: Some(5),
        };
        let first_run = offspring(&config, 8);
        let distinct: HashSet<&String> = first_run.iter().collect();
        assert!(distinct.len() > 1, "all offspring identical: {:?}", first_run);

        assert_eq!(offspring(&config, 8), first_run);
    }

    #[test]
    fn test_dup_copies_link_and_score() {
        let mut genome = three_genes();
        genome.score = 412.5;
        let copy = genome.dup();
        assert_eq!(copy.link_func, "+");
        assert_eq!(copy.score, 412.5);
        assert_eq!(copy.to_string(), genome.to_string());
    }

    #[test]
    fn test_dup_is_structurally_independent() {
        let mut rng = StdRng::seed_from_u64(1);
        let genes = vec![
            KarvaGene::math("+.*.d0.d1.d2.d0.d1").unwrap(),
            KarvaGene::math("-.d0.d1.d0.d1").unwrap(),
        ];
        let genome = Genome::new(genes, "*").unwrap();
        let before = genome.to_string();

        let mut copy = genome.dup();
        assert_eq!(copy.to_string(), before);
        copy.mutate(200, &mut rng);
        assert_eq!(genome.to_string(), before);
    }

    #[test]
    fn test_dup_does_not_carry_symbol_cache() {
        let genome = three_genes();
        let _ = genome.symbol_count("+");
        let copy = genome.dup();
        assert!(copy.symbol_map.get().is_none());
    }

    #[test]
    fn test_dup_opt_absent_source() {
        let _ = env_logger::builder().is_test(true).try_init();
        assert!(Genome::<FixedGene>::dup_opt(None).is_none());

        let genome = three_genes();
        let copy = Genome::dup_opt(Some(&genome)).unwrap();
        assert_eq!(copy.to_string(), genome.to_string());
    }
}
