//! The boundary to generated model code.
//!
//! A model generator emits one type per reaction network implementing
//! [`ModelDefinition`]: the three ordered name/population sequences, the
//! stoichiometry of each reaction, and the rate expressions registered by
//! reaction index.

use crn_core::{CrnResult, ReactionId, ReactionNetwork, SpeciesId, Stoichiometry};
use crn_propensity::{PropensityResult, RateTable, RateTableBuilder};

pub trait ModelDefinition {
    fn species_names(&self) -> Vec<String>;

    /// Same length and order as [`species_names`][Self::species_names].
    fn initial_populations(&self) -> Vec<u64>;

    fn reaction_names(&self) -> Vec<String>;

    /// One entry per reaction, in reaction order.
    fn stoichiometry(&self) -> Vec<Stoichiometry>;

    /// Register the ODE rate expression of every reaction.
    fn register_rates(&self, builder: RateTableBuilder) -> RateTableBuilder;

    /// Mass-action rate constants, one per reaction, for stochastic runs.
    fn rate_constants(&self) -> Vec<f64>;

    fn build_network(&self) -> CrnResult<ReactionNetwork> {
        ReactionNetwork::from_parts(
            self.species_names(),
            self.initial_populations(),
            self.reaction_names(),
            self.stoichiometry(),
        )
    }

    fn rate_table(&self, network: &ReactionNetwork) -> PropensityResult<RateTable> {
        self.register_rates(RateTableBuilder::new(network)).build()
    }
}

// ── DecayModel ────────────────────────────────────────────────────────────────

const A: SpeciesId = SpeciesId(0);
const B: SpeciesId = SpeciesId(1);

/// `A → B` at rate `k · [A]`, starting from 100 `A` and no `B`.
#[derive(Copy, Clone, Debug)]
pub struct DecayModel {
    pub k: f64,
}

impl Default for DecayModel {
    fn default() -> Self {
        Self { k: 0.1 }
    }
}

impl ModelDefinition for DecayModel {
    fn species_names(&self) -> Vec<String> {
        vec!["A".into(), "B".into()]
    }

    fn initial_populations(&self) -> Vec<u64> {
        vec![100, 0]
    }

    fn reaction_names(&self) -> Vec<String> {
        vec!["decay".into()]
    }

    fn stoichiometry(&self) -> Vec<Stoichiometry> {
        vec![Stoichiometry::new().reactant(A, 1).product(B, 1)]
    }

    fn register_rates(&self, builder: RateTableBuilder) -> RateTableBuilder {
        let k = self.k;
        builder.continuous(ReactionId(0), move |x| k * x[A.index()])
    }

    fn rate_constants(&self) -> Vec<f64> {
        vec![self.k]
    }
}
