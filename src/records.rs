//! Flow record field generation.
//!
//! Zips the timestamp sequence with randomly drawn address pairs, protocol
//! numbers and byte/packet sizes. None of these fields carry any statistical
//! model; they only need to look plausible next to the shaped timestamps.

use std::collections::HashSet;
use std::net::Ipv4Addr;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::config::RecordConfig;
use crate::timestamps::FlowTimestamp;

/// One synthetic flow row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowRecord {
    pub bytes: f64,
    pub packets: u32,
    pub protocol: u8,
    #[serde(rename = "sourceIP")]
    pub source_ip: Ipv4Addr,
    #[serde(rename = "Destination IP")]
    pub destination_ip: Ipv4Addr,
    pub timestamp: FlowTimestamp,
}

/// Fixed pool of distinct addresses that flows are drawn from.
#[derive(Debug, Clone)]
pub struct IpPool {
    addresses: Vec<Ipv4Addr>,
}

impl IpPool {
    /// Draws `size` distinct addresses from `1..=0xFFFF_FFFF`.
    pub fn random<R>(size: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut seen = HashSet::with_capacity(size);
        let mut addresses = Vec::with_capacity(size);
        while addresses.len() < size {
            let raw: u32 = rng.gen_range(1..=u32::MAX);
            if seen.insert(raw) {
                addresses.push(Ipv4Addr::from(raw));
            }
        }
        Self { addresses }
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Picks a (source, destination) pair with distinct endpoints.
    ///
    /// Returns `None` if the pool has fewer than two distinct addresses.
    pub fn pick_pair<R>(&self, rng: &mut R) -> Option<(Ipv4Addr, Ipv4Addr)>
    where
        R: Rng + ?Sized,
    {
        let first = *self.addresses.first()?;
        if self.addresses.iter().all(|a| *a == first) {
            return None;
        }
        loop {
            let src = self.addresses[rng.gen_range(0..self.addresses.len())];
            let dst = self.addresses[rng.gen_range(0..self.addresses.len())];
            if src != dst {
                return Some((src, dst));
            }
        }
    }
}

/// Produces flow records for a timestamp sequence.
#[derive(Debug, Clone)]
pub struct RecordGenerator {
    config: RecordConfig,
    pool: IpPool,
}

impl RecordGenerator {
    pub fn new(config: RecordConfig, pool: IpPool) -> Self {
        Self { config, pool }
    }

    pub fn pool(&self) -> &IpPool {
        &self.pool
    }

    pub fn protocol<R>(&self, rng: &mut R) -> u8
    where
        R: Rng + ?Sized,
    {
        rng.gen_range(0..=self.config.protocol_max)
    }

    /// Byte count rounded to one decimal, with the packets needed to carry it.
    pub fn bytes_and_packets<R>(&self, rng: &mut R) -> (f64, u32)
    where
        R: Rng + ?Sized,
    {
        let raw = rng.gen_range(self.config.min_bytes..self.config.max_bytes);
        let bytes = (raw * 10.0).round() / 10.0;
        let packets = (bytes / self.config.packet_size as f64).ceil() as u32;
        (bytes, packets.max(1))
    }

    pub fn record<R>(&self, timestamp: FlowTimestamp, rng: &mut R) -> Option<FlowRecord>
    where
        R: Rng + ?Sized,
    {
        let (source_ip, destination_ip) = self.pool.pick_pair(rng)?;
        let protocol = self.protocol(rng);
        let (bytes, packets) = self.bytes_and_packets(rng);
        Some(FlowRecord {
            bytes,
            packets,
            protocol,
            source_ip,
            destination_ip,
            timestamp,
        })
    }

    /// One record per timestamp, in timestamp order.
    pub fn generate<R>(&self, timestamps: &[FlowTimestamp], rng: &mut R) -> Vec<FlowRecord>
    where
        R: Rng + ?Sized,
    {
        let records: Vec<FlowRecord> = timestamps
            .iter()
            .filter_map(|ts| self.record(*ts, rng))
            .collect();
        debug!(
            "Generated {} records from a pool of {} addresses",
            records.len(),
            self.pool.len()
        );
        records
    }
}
