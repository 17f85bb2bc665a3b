// SPDX-License-Identifier: Apache-2.0
// This file defines the attestation report as seen by the printer. It contains the decoder from the raw firmware layout and both text renderings.

use std::fmt;

use anyhow::{anyhow, Result};

/// Size of the guest-supplied data field in a report request.
pub const REPORT_DATA_SIZE: usize = 64;

/// Size of a full SEV-SNP attestation report.
pub const ATTESTATION_REPORT_SIZE: usize = 0x4a0;

/// Width of the field-name column in the verbose table.
const FIELD_NAME_WIDTH: usize = 20;

/// A fixed-size byte string that prints as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HexBytes<const N: usize>(pub [u8; N]);

impl<const N: usize> Default for HexBytes<N> {
    fn default() -> Self {
        HexBytes([0u8; N])
    }
}

impl<const N: usize> fmt::Display for HexBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl<const N: usize> fmt::Debug for HexBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Attestation report of the running guest, in hardware field order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AttestationReport {
    pub version: u32,
    pub guest_svn: u32,
    pub policy: u64,
    pub family_id: HexBytes<16>,
    pub image_id: HexBytes<16>,
    pub vmpl: u32,
    pub signature_algo: u32,
    /// Current TCB of the platform.
    pub platform_version: u64,
    pub platform_info: u64,
    pub author_key_en: u32,
    pub report_data: HexBytes<64>,
    pub measurement: HexBytes<48>,
    pub host_data: HexBytes<32>,
    pub id_key_digest: HexBytes<48>,
    pub author_key_digest: HexBytes<48>,
    pub report_id: HexBytes<32>,
    /// Report ID of the guest's migration agent.
    pub report_id_ma: HexBytes<32>,
    /// TCB version used to derive the VCEK that signed this report.
    pub reported_tcb: u64,
    pub chip_id: HexBytes<64>,
    /// Committed TCB.
    pub committed_svn: HexBytes<8>,
    /// Build, minor and major of the committed firmware version.
    pub committed_version: HexBytes<4>,
    /// Current TCB at the time the guest was launched.
    pub launch_svn: HexBytes<8>,
    pub signature: HexBytes<512>,
}

// Little-endian field readers over a buffer already checked to hold a full report.
fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(buf)
}

fn u64_at(bytes: &[u8], offset: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_le_bytes(buf)
}

fn bytes_at<const N: usize>(bytes: &[u8], offset: usize) -> HexBytes<N> {
    let mut buf = [0u8; N];
    buf.copy_from_slice(&bytes[offset..offset + N]);
    HexBytes(buf)
}

impl AttestationReport {
    /// Decode a report from its raw firmware layout.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < ATTESTATION_REPORT_SIZE {
            return Err(anyhow!(
                "attestation report must be {} bytes, but got {}",
                ATTESTATION_REPORT_SIZE,
                bytes.len()
            ));
        }

        Ok(AttestationReport {
            version: u32_at(bytes, 0x00),
            guest_svn: u32_at(bytes, 0x04),
            policy: u64_at(bytes, 0x08),
            family_id: bytes_at(bytes, 0x10),
            image_id: bytes_at(bytes, 0x20),
            vmpl: u32_at(bytes, 0x30),
            signature_algo: u32_at(bytes, 0x34),
            platform_version: u64_at(bytes, 0x38),
            platform_info: u64_at(bytes, 0x40),
            author_key_en: u32_at(bytes, 0x48),
            report_data: bytes_at(bytes, 0x50),
            measurement: bytes_at(bytes, 0x90),
            host_data: bytes_at(bytes, 0xc0),
            id_key_digest: bytes_at(bytes, 0xe0),
            author_key_digest: bytes_at(bytes, 0x110),
            report_id: bytes_at(bytes, 0x140),
            report_id_ma: bytes_at(bytes, 0x160),
            reported_tcb: u64_at(bytes, 0x180),
            chip_id: bytes_at(bytes, 0x1a0),
            committed_svn: bytes_at(bytes, 0x1e0),
            committed_version: bytes_at(bytes, 0x1ec),
            launch_svn: bytes_at(bytes, 0x1f0),
            signature: bytes_at(bytes, 0x2a0),
        })
    }

    /// Field-by-field table, one `name value` line per field.
    pub fn verbose(&self) -> Verbose<'_> {
        Verbose(self)
    }
}

/// Display adapter for [`AttestationReport::verbose`].
pub struct Verbose<'a>(&'a AttestationReport);

impl fmt::Display for Verbose<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        let w = FIELD_NAME_WIDTH;
        writeln!(f, "{:<w$}{:08x}", "Version", r.version)?;
        writeln!(f, "{:<w$}{:08x}", "GuestSVN", r.guest_svn)?;
        writeln!(f, "{:<w$}{:016x}", "Policy", r.policy)?;
        writeln!(f, "{:<w$}{}", "FamilyID", r.family_id)?;
        writeln!(f, "{:<w$}{}", "ImageID", r.image_id)?;
        writeln!(f, "{:<w$}{:08x}", "VMPL", r.vmpl)?;
        writeln!(f, "{:<w$}{:08x}", "SignatureAlgo", r.signature_algo)?;
        writeln!(f, "{:<w$}{:016x}", "PlatformVersion", r.platform_version)?;
        writeln!(f, "{:<w$}{:016x}", "PlatformInfo", r.platform_info)?;
        writeln!(f, "{:<w$}{:08x}", "AuthorKeyEn", r.author_key_en)?;
        writeln!(f, "{:<w$}{}", "ReportData", r.report_data)?;
        writeln!(f, "{:<w$}{}", "Measurement", r.measurement)?;
        writeln!(f, "{:<w$}{}", "HostData", r.host_data)?;
        writeln!(f, "{:<w$}{}", "IDKeyDigest", r.id_key_digest)?;
        writeln!(f, "{:<w$}{}", "AuthorKeyDigest", r.author_key_digest)?;
        writeln!(f, "{:<w$}{}", "ReportID", r.report_id)?;
        writeln!(f, "{:<w$}{}", "ReportIDMA", r.report_id_ma)?;
        writeln!(f, "{:<w$}{:016x}", "ReportTCB", r.reported_tcb)?;
        writeln!(f, "{:<w$}{}", "ChipID", r.chip_id)?;
        writeln!(f, "{:<w$}{}", "CommittedSVN", r.committed_svn)?;
        writeln!(f, "{:<w$}{}", "CommittedVersion", r.committed_version)?;
        writeln!(f, "{:<w$}{}", "LaunchSVN", r.launch_svn)?;
        writeln!(f, "{:<w$}{}", "Signature", r.signature)
    }
}

/// Zero-pad caller data into the 64-byte request field.
pub fn pad_report_data(data: &[u8]) -> Result<[u8; REPORT_DATA_SIZE]> {
    if data.len() > REPORT_DATA_SIZE {
        return Err(anyhow!(
            "report data must be at most {} bytes, but got {}",
            REPORT_DATA_SIZE,
            data.len()
        ));
    }

    let mut request = [0u8; REPORT_DATA_SIZE];
    request[..data.len()].copy_from_slice(data);
    Ok(request)
}
