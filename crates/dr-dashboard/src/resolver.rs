//! Scenario title to recovery-process filename mapping.
//!
//! Runbook filenames predate several title edits, so a curated table of
//! exact titles is consulted first and a mechanical slug is the fallback.
//! Several titles may share one runbook.

use regex::Regex;
use std::sync::LazyLock;

/// Exact title overrides. Matching is byte-for-byte.
static OVERRIDES: &[(&str, &str)] = &[
    // Pod / node level
    ("Single MySQL pod failure (container crash / OOM)", "single-mysql-pod-failure.md"),
    ("Single MySQL pod failure", "single-mysql-pod-failure.md"),
    ("MySQL pod crash loop (CrashLoopBackOff)", "single-mysql-pod-failure.md"),
    ("Kubernetes worker node failure (VM host crash)", "kubernetes-worker-node-failure.md"),
    ("Kubernetes worker node failure", "kubernetes-worker-node-failure.md"),
    ("Disk full on MySQL data volume", "disk-full-on-data-volume.md"),
    ("MySQL data volume out of space", "disk-full-on-data-volume.md"),
    // Storage
    ("Storage PVC corruption", "storage-pvc-corruption.md"),
    ("Persistent volume corruption or loss", "storage-pvc-corruption.md"),
    ("S3 backup target unavailable (regional outage)", "s3-backup-target-unavailable.md"),
    ("Backup storage unavailable (SeaweedFS outage)", "s3-backup-target-unavailable.md"),
    ("Corrupted or unrestorable backup", "corrupted-backup.md"),
    ("Backup job failures undetected for days", "backup-job-failures-undetected.md"),
    ("Binlog/PITR gap (missing binary logs)", "binlog-pitr-gap.md"),
    // Site level
    ("Primary DC power/cooling outage (site down)", "primary-dc-power-cooling-outage.md"),
    ("Primary datacenter down (power, cooling, or network)", "primary-dc-power-cooling-outage.md"),
    ("Secondary DC down (replica site loss)", "secondary-dc-down.md"),
    ("Both DCs down (regional disaster)", "both-dcs-down.md"),
    ("Network partition between data centers", "network-partition-between-dcs.md"),
    ("Loss of cross-DC network link (split brain risk)", "network-partition-between-dcs.md"),
    ("Replication lag exceeds RPO (async replica behind)", "replication-lag-exceeds-rpo.md"),
    // Cluster level
    ("Cluster-wide quorum loss (multiple PXC pods down)", "cluster-wide-quorum-loss.md"),
    ("Kubernetes control plane outage (API server down)", "kubernetes-control-plane-outage.md"),
    ("Percona Operator / CRD misconfiguration (bad rollout)", "percona-operator-crd-misconfiguration.md"),
    ("Failed MySQL major version upgrade", "failed-mysql-upgrade.md"),
    ("MySQL upgrade rollback required", "failed-mysql-upgrade.md"),
    ("Certificate expiry (TLS between nodes or clients)", "certificate-expiry.md"),
    ("Expired TLS certificates", "certificate-expiry.md"),
    // Network and mesh
    ("HAProxy/ProxySQL routing failure", "proxy-routing-failure.md"),
    ("ProxySQL/HAProxy misrouting or outage", "proxy-routing-failure.md"),
    ("Istio sidecar / mesh failure blocking DB traffic", "service-mesh-failure.md"),
    ("DNS resolution failure inside cluster", "dns-resolution-failure.md"),
    ("Monitoring/alerting outage (PMM down)", "monitoring-outage.md"),
    // Human and security
    ("Accidental DROP/DELETE/TRUNCATE (logical data loss)", "accidental-drop-delete-truncate.md"),
    ("Widespread data corruption (bad migration/script)", "widespread-data-corruption.md"),
    ("Human error: kubectl delete namespace", "accidental-namespace-deletion.md"),
    ("Accidental namespace deletion", "accidental-namespace-deletion.md"),
    ("Ransomware attack", "ransomware-attack.md"),
    ("Ransomware or malicious encryption of data", "ransomware-attack.md"),
    ("Credential compromise (DB or S3 keys)", "credential-compromise.md"),
];

static DASH_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());
static DOT_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{2,}").unwrap());

/// Resolve the runbook filename for a scenario title. Never fails.
pub fn resolve(title: &str) -> String {
    override_for(title).map_or_else(|| slugify(title), str::to_string)
}

/// Look up a title in the override table.
pub fn override_for(title: &str) -> Option<&'static str> {
    OVERRIDES
        .iter()
        .find(|(known, _)| *known == title)
        .map(|(_, file)| *file)
}

/// All `(title, filename)` overrides, in table order.
pub fn overrides() -> impl Iterator<Item = (&'static str, &'static str)> {
    OVERRIDES.iter().copied()
}

/// Mechanical filename for titles without an override.
///
/// Dot runs are collapsed and edge dots trimmed so the result never contains
/// `..` and stays fetchable.
pub fn slugify(title: &str) -> String {
    let replaced: String = title
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            '(' | ')' | ',' | ':' => None,
            '/' | '\\' | ' ' => Some('-'),
            other => Some(other),
        })
        .collect();

    let dots = DOT_RUNS.replace_all(&replaced, ".");
    let collapsed = DASH_RUNS.replace_all(&dots, "-");
    format!("{}.md", collapsed.trim_matches(['-', '.']))
}
