//! Karva-notation expression gene.
//!
//! A gene is a fixed-length string of symbols split into a head (functions
//! or terminals) and a tail (terminals only). The expression tree is read
//! level by level: the root is symbol 0 and every function takes the next
//! `arity` unclaimed symbols as its children. Reading stops once every
//! function has its children; that prefix is the open reading frame (ORF)
//! and anything after it is carried along but never evaluated.
//!
//! Terminals are written `d0`, `d1`, ... and index into the inputs passed
//! to evaluation.
//!
//! ```text
//! "+.*.d0.d1.d2.d0.d1"   =>   (d1 * d2) + d0      ORF length 5
//! ```

use crate::error::{GepError, Result};
use crate::functions::{bool_functions, math_functions, BoolFuncMap, FunctionRegistry, MathFuncMap, Primitive};
use crate::gene::Gene;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Function { arity: usize },
    Input(usize),
}

impl Node {
    fn arity(self) -> usize {
        match self {
            Node::Function { arity } => arity,
            Node::Input(_) => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KarvaGene {
    symbols: Vec<String>,
    nodes: Vec<Node>,
    head_len: usize,
    orf_len: usize,
    /// Index of the first child of each ORF position
    children: Vec<usize>,
    /// Functions a head mutation may write, with their arities
    functions: Vec<(String, usize)>,
    num_inputs: usize,
    symbol_map: OnceLock<HashMap<String, usize>>,
}

impl KarvaGene {
    /// Parse a dot-separated Karva string, resolving function arities in
    /// `registry`.
    ///
    /// The head length is derived from the string length and the largest
    /// arity in the registry: `len = head * max_arity + 1`, rounding the head
    /// down. Functions past the head are rejected so that any later
    /// mutation keeps the tree complete.
    ///
    /// Mutation writes only the terminals the string already reaches (up to
    /// its highest `dN`); use [`KarvaGene::parse_with_inputs`] to open up the
    /// full input range.
    pub fn parse<F: ?Sized + Primitive>(karva: &str, registry: &FunctionRegistry<F>) -> Result<Self> {
        Self::parse_with_inputs(karva, registry, 0)
    }

    /// [`KarvaGene::parse`] with a terminal alphabet of at least
    /// `num_inputs` inputs (`d0` to `d{num_inputs - 1}`) for mutation.
    pub fn parse_with_inputs<F: ?Sized + Primitive>(
        karva: &str,
        registry: &FunctionRegistry<F>,
        num_inputs: usize,
    ) -> Result<Self> {
        let symbols: Vec<String> = karva.split('.').map(str::to_string).collect();

        let mut nodes = Vec::with_capacity(symbols.len());
        for (position, symbol) in symbols.iter().enumerate() {
            let node = if let Some(arity) = registry.arity(symbol) {
                Node::Function { arity }
            } else if let Some(index) = parse_input(symbol) {
                Node::Input(index)
            } else {
                return Err(GepError::UnknownSymbol {
                    symbol: symbol.clone(),
                    position,
                });
            };
            nodes.push(node);
        }

        let max_arity = registry.max_arity();
        let head_len = if max_arity == 0 {
            0
        } else {
            (symbols.len() - 1) / max_arity
        };

        if let Some(position) = nodes
            .iter()
            .skip(head_len)
            .position(|n| matches!(n, Node::Function { .. }))
        {
            let position = position + head_len;
            return Err(GepError::FunctionInTail {
                symbol: symbols[position].clone(),
                position,
                head_len,
            });
        }

        let (orf_len, children) =
            layout(&nodes).ok_or_else(|| GepError::TruncatedGene(karva.to_string()))?;

        let num_inputs = nodes
            .iter()
            .filter_map(|n| match n {
                Node::Input(i) => Some(i + 1),
                Node::Function { .. } => None,
            })
            .max()
            .unwrap_or(1)
            .max(num_inputs);

        let functions = registry
            .symbols()
            .into_iter()
            .filter_map(|s| registry.arity(s).map(|a| (s.to_string(), a)))
            .collect();

        Ok(Self {
            symbols,
            nodes,
            head_len,
            orf_len,
            children,
            functions,
            num_inputs,
            symbol_map: OnceLock::new(),
        })
    }

    /// Parse against the built-in numeric functions
    pub fn math(karva: &str) -> Result<Self> {
        Self::parse(karva, math_functions())
    }

    /// Parse against the built-in boolean functions
    pub fn boolean(karva: &str) -> Result<Self> {
        Self::parse(karva, bool_functions())
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn head_len(&self) -> usize {
        self.head_len
    }

    /// Number of leading symbols that take part in evaluation
    pub fn orf_len(&self) -> usize {
        self.orf_len
    }

    /// Number of distinct input terminals a mutation may write
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    fn eval_bool_at(&self, idx: usize, inputs: &[bool], fm: &BoolFuncMap) -> bool {
        match self.nodes[idx] {
            Node::Input(i) => inputs.get(i).copied().unwrap_or_else(|| {
                log::warn!("Input d{} out of range ({} inputs supplied)", i, inputs.len());
                false
            }),
            Node::Function { arity } => {
                let Some(function) = fm.get(&self.symbols[idx]) else {
                    log::warn!("Unable to find boolean function: {}", self.symbols[idx]);
                    return false;
                };
                let first = self.children[idx];
                let mut args = [false; 4];
                for (k, arg) in args.iter_mut().enumerate().take(arity) {
                    *arg = self.eval_bool_at(first + k, inputs, fm);
                }
                function.bool_function(args[0], args[1], args[2], args[3])
            }
        }
    }

    fn eval_math_at(&self, idx: usize, inputs: &[f64], fm: &MathFuncMap) -> f64 {
        match self.nodes[idx] {
            Node::Input(i) => inputs.get(i).copied().unwrap_or_else(|| {
                log::warn!("Input d{} out of range ({} inputs supplied)", i, inputs.len());
                0.0
            }),
            Node::Function { arity } => {
                let Some(function) = fm.get(&self.symbols[idx]) else {
                    log::warn!("Unable to find math function: {}", self.symbols[idx]);
                    return 0.0;
                };
                let first = self.children[idx];
                let mut args = [0.0; 4];
                for (k, arg) in args.iter_mut().enumerate().take(arity) {
                    *arg = self.eval_math_at(first + k, inputs, fm);
                }
                function.float64_function(args[0], args[1], args[2], args[3])
            }
        }
    }
}

impl Gene for KarvaGene {
    fn eval_bool(&self, inputs: &[bool], fm: &BoolFuncMap) -> bool {
        self.eval_bool_at(0, inputs, fm)
    }

    fn eval_math(&self, inputs: &[f64], fm: &MathFuncMap) -> f64 {
        self.eval_math_at(0, inputs, fm)
    }

    fn symbol_map(&self) -> &HashMap<String, usize> {
        self.symbol_map.get_or_init(|| {
            let mut counts = HashMap::new();
            for symbol in &self.symbols[..self.orf_len] {
                *counts.entry(symbol.clone()).or_insert(0) += 1;
            }
            counts
        })
    }

    fn mutate<R: Rng>(&mut self, rng: &mut R) {
        let position = rng.gen_range(0..self.symbols.len());
        let (symbol, node) = if position < self.head_len {
            let choice = rng.gen_range(0..self.functions.len() + self.num_inputs);
            match self.functions.get(choice) {
                Some((symbol, arity)) => (symbol.clone(), Node::Function { arity: *arity }),
                None => {
                    let index = choice - self.functions.len();
                    (format!("d{}", index), Node::Input(index))
                }
            }
        } else {
            let index = rng.gen_range(0..self.num_inputs);
            (format!("d{}", index), Node::Input(index))
        };

        let previous_node = std::mem::replace(&mut self.nodes[position], node);
        match layout(&self.nodes) {
            Some((orf_len, children)) => {
                log::trace!("Gene position {}: {} -> {}", position, self.symbols[position], symbol);
                self.symbols[position] = symbol;
                self.orf_len = orf_len;
                self.children = children;
                self.symbol_map = OnceLock::new();
            }
            None => {
                // Only reachable if the head/tail split was violated.
                log::warn!("Discarding mutation that would truncate gene {}", self);
                self.nodes[position] = previous_node;
            }
        }
    }
}

impl fmt::Display for KarvaGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbols.join("."))
    }
}

/// `d<digits>` -> input index
fn parse_input(symbol: &str) -> Option<usize> {
    let digits = symbol.strip_prefix('d')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Walk the level-order tree, returning the ORF length and the first-child
/// index of every ORF node. `None` when the tree runs off the end.
fn layout(nodes: &[Node]) -> Option<(usize, Vec<usize>)> {
    let mut children = Vec::new();
    let mut next = 1;
    let mut idx = 0;
    while idx < next {
        let node = nodes.get(idx)?;
        children.push(next);
        next += node.arity();
        idx += 1;
    }
    Some((next, children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_parse_and_display_round_trip() {
        let gene = KarvaGene::math("+.*.d0.d1.d2.d0.d1").unwrap();
        assert_eq!(gene.to_string(), "+.*.d0.d1.d2.d0.d1");
        assert_eq!(gene.orf_len(), 5);
        assert_eq!(gene.head_len(), 3);
        assert_eq!(gene.num_inputs(), 3);
    }

    #[test]
    fn test_eval_math_level_order() {
        // + has children (*, d0); * has children (d1, d2)
        let gene = KarvaGene::math("+.*.d0.d1.d2.d0.d1").unwrap();
        let result = gene.eval_math(&[1.0, 2.0, 3.0], math_functions());
        assert_eq!(result, 7.0);
    }

    #[test]
    fn test_eval_bool() {
        let gene = KarvaGene::boolean("And.Not.d1.d0.d0.d0.d0").unwrap();
        // Not(d0) And d1
        assert!(gene.eval_bool(&[false, true], bool_functions()));
        assert!(!gene.eval_bool(&[true, true], bool_functions()));
    }

    #[test]
    fn test_single_terminal_gene() {
        let gene = KarvaGene::math("d0").unwrap();
        assert_eq!(gene.orf_len(), 1);
        assert_eq!(gene.eval_math(&[4.5], math_functions()), 4.5);
    }

    #[test]
    fn test_missing_input_degrades_to_zero() {
        let gene = KarvaGene::math("+.d0.d3.d0.d0").unwrap();
        assert_eq!(gene.eval_math(&[2.0], math_functions()), 2.0);
    }

    #[test]
    fn test_function_missing_from_eval_registry() {
        let gene = KarvaGene::math("*.d0.d1").unwrap();
        let empty = MathFuncMap::new();
        assert_eq!(gene.eval_math(&[2.0, 3.0], &empty), 0.0);
    }

    #[test]
    fn test_symbol_map_counts_only_orf() {
        let gene = KarvaGene::math("+.d0.d0.*.d1.d1.d1.d1.d1").unwrap();
        assert_eq!(gene.head_len(), 4);
        assert_eq!(gene.orf_len(), 3);
        assert_eq!(gene.symbol_count("+"), 1);
        assert_eq!(gene.symbol_count("d0"), 2);
        assert_eq!(gene.symbol_count("*"), 0);
        assert_eq!(gene.symbol_count("d1"), 0);
    }

    #[test]
    fn test_unknown_symbol_rejected() {
        let err = KarvaGene::math("+.x.d0").unwrap_err();
        assert!(matches!(err, GepError::UnknownSymbol { position: 1, .. }));
        assert!(KarvaGene::math("").is_err());
        assert!(KarvaGene::math("d+1").is_err());
    }

    #[test]
    fn test_function_in_tail_rejected() {
        let err = KarvaGene::math("+.d0.*").unwrap_err();
        assert!(matches!(err, GepError::FunctionInTail { position: 2, head_len: 1, .. }));
    }

    #[test]
    fn test_mutation_keeps_gene_well_formed() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut gene = KarvaGene::math("+.*.-.d0.d1.d2.d0.d1.d2.d0").unwrap();
        let inputs = [1.0, 2.0, 3.0];
        for _ in 0..500 {
            gene.mutate(&mut rng);
            assert_eq!(gene.symbols().len(), 10);
            assert!(gene.orf_len() <= gene.symbols().len());
            for symbol in &gene.symbols()[gene.head_len()..] {
                assert!(symbol.starts_with('d'), "function {} in tail", symbol);
            }
            let reparsed = KarvaGene::math(&gene.to_string()).unwrap();
            assert_eq!(reparsed.orf_len(), gene.orf_len());
            let _ = gene.eval_math(&inputs, math_functions());
        }
    }

    #[test]
    fn test_mutation_stays_within_used_inputs_by_default() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut gene = KarvaGene::math("+.d0.d0.d0.d0").unwrap();
        assert_eq!(gene.num_inputs(), 1);
        for _ in 0..500 {
            gene.mutate(&mut rng);
        }
        assert!(gene.symbols().iter().all(|s| s != "d1"));
    }

    #[test]
    fn test_explicit_input_count_widens_mutation_alphabet() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut gene = KarvaGene::parse_with_inputs("+.d0.d0.d0.d0", math_functions(), 3).unwrap();
        assert_eq!(gene.num_inputs(), 3);
        assert_eq!(gene.eval_math(&[2.0, 7.0, 9.0], math_functions()), 4.0);

        let mut seen = HashSet::new();
        for _ in 0..2000 {
            gene.mutate(&mut rng);
            seen.extend(gene.symbols().iter().filter(|s| s.starts_with('d')).cloned());
        }
        for input in ["d0", "d1", "d2"] {
            assert!(seen.contains(input), "{} never written", input);
        }
        assert!(!seen.contains("d3"));
    }

    #[test]
    fn test_explicit_input_count_never_narrows() {
        let gene = KarvaGene::parse_with_inputs("+.d0.d4.d0.d0", math_functions(), 2).unwrap();
        assert_eq!(gene.num_inputs(), 5);
    }

    #[test]
    fn test_mutation_resets_symbol_map() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut gene = KarvaGene::math("d0.d0.d0").unwrap();
        assert_eq!(gene.symbol_count("d0"), 1);
        // With a 3-symbol string and max arity 2 the head is 1 long; keep
        // mutating until the root becomes a function.
        while gene.orf_len() == 1 {
            gene.mutate(&mut rng);
        }
        assert!(gene.symbol_map().values().sum::<usize>() > 1);
    }

    #[test]
    fn test_dup_is_independent() {
        let mut rng = StdRng::seed_from_u64(3);
        let original = KarvaGene::math("+.*.d0.d1.d2.d0.d1").unwrap();
        let mut copy = original.dup();
        for _ in 0..50 {
            copy.mutate(&mut rng);
        }
        assert_eq!(original.to_string(), "+.*.d0.d1.d2.d0.d1");
    }
}
