// SPDX-License-Identifier: Apache-2.0
// This is the library behind the snp-report utility. It fetches the SEV-SNP attestation report and derived keys of the running guest and renders them as text.

pub mod cli;
pub mod dump;
pub mod firmware;
pub mod provider;
pub mod report;

pub use cli::Args;
pub use provider::AttestationProvider;
pub use report::AttestationReport;
