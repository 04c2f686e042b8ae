//! Gene-level operators over action tables.
//!
//! This module provides the operators the evolution engine applies to
//! the [`ActionTable`] genotype: random initialization, per-gene
//! mutation, single-point crossover, and the similarity measure used by
//! the archive's diversity diagnostic. The operator constants live here
//! with the operators they parameterize.

use std::iter;

use canbot_engine::ContextCode;
use rand::Rng;

use crate::policy::ActionTable;

/// Probability that any single gene is redrawn during mutation.
pub const GENE_MUTATION_RATE: f64 = 0.01;

/// The fixed crossover locus: the midpoint of the 243-gene table.
/// Genes before the locus come from the first parent, genes at and
/// after it from the second.
pub const CROSSOVER_LOCUS: usize = ActionTable::LEN / 2;

/// Creates a table with every gene drawn uniformly from the action set.
pub fn random_table<R>(rng: &mut R) -> ActionTable
where
    R: Rng + ?Sized,
{
    ActionTable::from_fn(|_| rng.random())
}

/// Redraws each gene with probability [`GENE_MUTATION_RATE`].
///
/// A redraw is uniform over the whole action set, so a "mutated" gene
/// can keep its old value.
pub fn mutate<R>(table: &mut ActionTable, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for code in ContextCode::all() {
        if rng.random_bool(GENE_MUTATION_RATE) {
            table.set(code, rng.random());
        }
    }
}

/// Single-point crossover at [`CROSSOVER_LOCUS`].
///
/// `single_point_cross(a, b)` and `single_point_cross(b, a)` are
/// complementary offspring: together they partition the parents' genes.
#[must_use]
pub fn single_point_cross(a: &ActionTable, b: &ActionTable) -> ActionTable {
    ActionTable::from_fn(|code| {
        if code.index() < CROSSOVER_LOCUS {
            a.get(code)
        } else {
            b.get(code)
        }
    })
}

/// Fraction of genes on which the two tables agree, in `[0, 1]`.
///
/// Reflexive (a table is fully similar to itself) and symmetric.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn similarity(a: &ActionTable, b: &ActionTable) -> f32 {
    let agreeing = iter::zip(a.actions(), b.actions())
        .filter(|(x, y)| x == y)
        .count();
    agreeing as f32 / ActionTable::LEN as f32
}
