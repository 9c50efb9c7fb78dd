//! Reaction network representation and builder.
//!
//! # Data layout
//!
//! Species are stored as two parallel arrays (`species_names`,
//! `initial_populations`) indexed by [`SpeciesId`].  Reactions are stored as
//! parallel arrays (`reaction_names`, `stoichiometry`, `net_changes`) indexed
//! by [`ReactionId`].  Both id spaces are dense and fixed at construction.
//!
//! The rate law of a reaction does **not** live here.  It is registered
//! against a propensity model (see `crn-propensity`) by reaction index; the
//! network only owns identity and stoichiometric bookkeeping.
//!
//! A `ReactionNetwork` is immutable after construction.

use std::collections::HashMap;

use crate::{CrnError, CrnResult, ReactionId, SpeciesId};

#[cfg(feature = "fx-hash")]
type NameIndex<K> = rustc_hash::FxHashMap<String, K>;
#[cfg(not(feature = "fx-hash"))]
type NameIndex<K> = HashMap<String, K>;

// ── Stoichiometry ─────────────────────────────────────────────────────────────

/// Reactant and product coefficients of one reaction.
///
/// Entries naming the same species twice are summed when net changes are
/// computed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stoichiometry {
    pub reactants: Vec<(SpeciesId, u32)>,
    pub products:  Vec<(SpeciesId, u32)>,
}

impl Stoichiometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` molecules of `species` to the reactant side.
    pub fn reactant(mut self, species: SpeciesId, count: u32) -> Self {
        self.reactants.push((species, count));
        self
    }

    /// Add `count` molecules of `species` to the product side.
    pub fn product(mut self, species: SpeciesId, count: u32) -> Self {
        self.products.push((species, count));
        self
    }

    /// Total number of reactant molecules consumed by one firing.
    pub fn order(&self) -> u32 {
        self.reactants.iter().map(|&(_, n)| n).sum()
    }

    /// `products - reactants`, one entry per touched species, zero entries
    /// dropped, sorted by `SpeciesId`.
    fn net_change(&self) -> Vec<(SpeciesId, i64)> {
        let mut delta: HashMap<SpeciesId, i64> = HashMap::new();
        for &(s, n) in &self.reactants {
            *delta.entry(s).or_default() -= n as i64;
        }
        for &(s, n) in &self.products {
            *delta.entry(s).or_default() += n as i64;
        }
        let mut out: Vec<(SpeciesId, i64)> = delta.into_iter().filter(|&(_, d)| d != 0).collect();
        out.sort_unstable_by_key(|&(s, _)| s);
        out
    }

    fn species(&self) -> impl Iterator<Item = SpeciesId> + '_ {
        self.reactants.iter().chain(&self.products).map(|&(s, _)| s)
    }
}

// ── ReactionNetwork ───────────────────────────────────────────────────────────

/// Static description of species and reactions.
///
/// Construct via [`ReactionNetwork::new`] (three parallel sequences, no
/// stoichiometry) or [`ReactionNetworkBuilder`].
#[derive(Clone, Debug)]
pub struct ReactionNetwork {
    species_names:       Vec<String>,
    initial_populations: Vec<u64>,
    reaction_names:      Vec<String>,
    stoichiometry:       Vec<Stoichiometry>,
    /// Precomputed `products - reactants` per reaction.
    net_changes:         Vec<Vec<(SpeciesId, i64)>>,
    species_index:       NameIndex<SpeciesId>,
    reaction_index:      NameIndex<ReactionId>,
}

impl ReactionNetwork {
    /// Build a network from the three ordered sequences emitted by the model
    /// generator.  Reactions get an empty stoichiometry.
    ///
    /// Fails with [`CrnError::DuplicateName`] if two species or two reactions
    /// share a name (case-sensitive), or [`CrnError::LengthMismatch`] if
    /// `populations` is not the same length as `species_names`.
    pub fn new(
        species_names:  Vec<String>,
        populations:    Vec<u64>,
        reaction_names: Vec<String>,
    ) -> CrnResult<Self> {
        let stoichiometry = vec![Stoichiometry::default(); reaction_names.len()];
        Self::from_parts(species_names, populations, reaction_names, stoichiometry)
    }

    /// Like [`new`][Self::new], with one [`Stoichiometry`] per reaction.
    pub fn from_parts(
        species_names:  Vec<String>,
        populations:    Vec<u64>,
        reaction_names: Vec<String>,
        stoichiometry:  Vec<Stoichiometry>,
    ) -> CrnResult<Self> {
        if populations.len() != species_names.len() {
            return Err(CrnError::LengthMismatch {
                expected: species_names.len(),
                got:      populations.len(),
                what:     "initial populations",
            });
        }
        if stoichiometry.len() != reaction_names.len() {
            return Err(CrnError::Config(format!(
                "{} stoichiometry entries for {} reactions",
                stoichiometry.len(),
                reaction_names.len()
            )));
        }

        let species_index = build_index(&species_names, "species", SpeciesId)?;
        let reaction_index = build_index(&reaction_names, "reaction", ReactionId)?;

        let species_count = species_names.len();
        for stoich in &stoichiometry {
            if let Some(bad) = stoich.species().find(|s| s.index() >= species_count) {
                return Err(CrnError::SpeciesNotFound(bad));
            }
        }
        let net_changes = stoichiometry.iter().map(Stoichiometry::net_change).collect();

        log::debug!(
            "reaction network built: {} species, {} reactions",
            species_count,
            reaction_names.len()
        );

        Ok(Self {
            species_names,
            initial_populations: populations,
            reaction_names,
            stoichiometry,
            net_changes,
            species_index,
            reaction_index,
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn species_count(&self) -> usize {
        self.species_names.len()
    }

    pub fn reaction_count(&self) -> usize {
        self.reaction_names.len()
    }

    // ── Species accessors ─────────────────────────────────────────────────

    pub fn species_names(&self) -> &[String] {
        &self.species_names
    }

    pub fn initial_populations(&self) -> &[u64] {
        &self.initial_populations
    }

    pub fn species_name(&self, id: SpeciesId) -> Option<&str> {
        self.species_names.get(id.index()).map(String::as_str)
    }

    pub fn initial_population(&self, id: SpeciesId) -> Option<u64> {
        self.initial_populations.get(id.index()).copied()
    }

    /// Case-sensitive name lookup.
    pub fn species_id(&self, name: &str) -> Option<SpeciesId> {
        self.species_index.get(name).copied()
    }

    pub fn species_ids(&self) -> impl Iterator<Item = SpeciesId> {
        (0..self.species_count() as u32).map(SpeciesId)
    }

    // ── Reaction accessors ────────────────────────────────────────────────

    pub fn reaction_names(&self) -> &[String] {
        &self.reaction_names
    }

    pub fn reaction_name(&self, id: ReactionId) -> Option<&str> {
        self.reaction_names.get(id.index()).map(String::as_str)
    }

    /// Case-sensitive name lookup.
    pub fn reaction_id(&self, name: &str) -> Option<ReactionId> {
        self.reaction_index.get(name).copied()
    }

    pub fn reaction_ids(&self) -> impl Iterator<Item = ReactionId> {
        (0..self.reaction_count() as u32).map(ReactionId)
    }

    pub fn stoichiometry(&self, id: ReactionId) -> Option<&Stoichiometry> {
        self.stoichiometry.get(id.index())
    }

    /// Net population change caused by one firing of `id`.
    ///
    /// # Panics
    /// Panics if `id` is out of range; solvers iterate `reaction_ids()`.
    #[inline]
    pub fn net_changes(&self, id: ReactionId) -> &[(SpeciesId, i64)] {
        &self.net_changes[id.index()]
    }
}

fn build_index<K: Copy>(
    names: &[String],
    kind:  &'static str,
    make:  fn(u32) -> K,
) -> CrnResult<NameIndex<K>> {
    let mut index = NameIndex::default();
    for (i, name) in names.iter().enumerate() {
        if index.insert(name.clone(), make(i as u32)).is_some() {
            return Err(CrnError::DuplicateName { kind, name: name.clone() });
        }
    }
    Ok(index)
}

// ── ReactionNetworkBuilder ────────────────────────────────────────────────────

/// Incremental builder for [`ReactionNetwork`].
///
/// Ids are handed out immediately so reactions can reference species added
/// earlier; name uniqueness is checked in [`build`][Self::build].
///
/// ```rust,ignore
/// let mut b = ReactionNetworkBuilder::new();
/// let a = b.add_species("A", 100);
/// let bb = b.add_species("B", 0);
/// b.add_reaction("convert", Stoichiometry::new().reactant(a, 1).product(bb, 1));
/// let network = b.build()?;
/// ```
#[derive(Default)]
pub struct ReactionNetworkBuilder {
    species_names:  Vec<String>,
    populations:    Vec<u64>,
    reaction_names: Vec<String>,
    stoichiometry:  Vec<Stoichiometry>,
}

impl ReactionNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_species(&mut self, name: impl Into<String>, initial_population: u64) -> SpeciesId {
        let id = SpeciesId(self.species_names.len() as u32);
        self.species_names.push(name.into());
        self.populations.push(initial_population);
        id
    }

    pub fn add_reaction(&mut self, name: impl Into<String>, stoichiometry: Stoichiometry) -> ReactionId {
        let id = ReactionId(self.reaction_names.len() as u32);
        self.reaction_names.push(name.into());
        self.stoichiometry.push(stoichiometry);
        id
    }

    pub fn build(self) -> CrnResult<ReactionNetwork> {
        ReactionNetwork::from_parts(
            self.species_names,
            self.populations,
            self.reaction_names,
            self.stoichiometry,
        )
    }
}
