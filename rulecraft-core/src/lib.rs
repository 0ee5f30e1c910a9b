// rulecraft-core/src/lib.rs

// 1. Documentation
#![allow(missing_docs)] // On autorise le manque de doc pour le moment

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// 1. Ports (Interfaces / Traits)
// Contrats des services externes : tables, suggestions, SQL, validation, registre, notifications.
pub mod ports;

// 2. Domain (Cœur du métier)
// Règles, brouillon, résultat de validation, machine à états de la session.
// Ne dépend de RIEN d'autre (ni infra, ni app).
pub mod domain;

// 3. Infrastructure (Adapters)
// Adaptateurs déterministes, configuration YAML, templates SQL.
pub mod infrastructure;

// 4. Application (Use Cases)
// Orchestration : workflow de rédaction, gestion des règles, assistant.
pub mod application;

// --- GESTION DES ERREURS GLOBALE ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::RuleCraftError;
