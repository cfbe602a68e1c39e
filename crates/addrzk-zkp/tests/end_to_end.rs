//! # End-to-End Proof Scenarios
//!
//! Prover and verifier exchange proofs as JSON, the way two processes would.
//! Every scenario serializes on the prover side and parses on the verifier
//! side before checking.

use addrzk_core::{AddressInput, CountryCode, FacilityId, Pid, Timestamp};
use addrzk_crypto::merkle;
use addrzk_crypto::{Blinding, Secret};
use addrzk_zkp::backend::ProofPolicy;
use addrzk_zkp::patterns::locker::{self, ZkLockerProof};
use addrzk_zkp::patterns::membership::{self, ZkMembershipProof};
use addrzk_zkp::patterns::structure::{self, ZkStructureProof};
use addrzk_zkp::patterns::version::{self, PidOpening, RevocationList, VersionChecks, ZkVersionProof};
use addrzk_zkp::{
    verify_address_proof, AddressProof, Algorithm, CircuitDescriptor, CircuitKind,
    HierarchyRules, LegacyAddressProof, MemoryReplayGuard, ProofConfig, ProofOptions,
    VerifyFailure, VerifyOptions, ZkpAddressProof, ZkpAddressProver,
};

fn tokyo_address() -> AddressInput {
    AddressInput::new()
        .with("recipient", "Taro Yamada")
        .with("street_address", "1-2-3 Jingumae")
        .with("city", "Shibuya")
        .with("province", "Tokyo")
        .with("postal_code", "150-0001")
        .with("country", "JP")
}

fn secret(s: &str) -> Secret {
    Secret::from_bytes(s.as_bytes().to_vec()).expect("non-empty secret")
}

fn pid(s: &str) -> Pid {
    Pid::new(s).expect("valid pid")
}

/// Serialize, then parse as the receiving process would.
fn transport<T: serde::Serialize + serde::de::DeserializeOwned>(value: &T) -> T {
    let json = serde_json::to_string(value).expect("serialize");
    serde_json::from_str(&json).expect("deserialize")
}

// ---------------------------------------------------------------------------
// Address proofs
// ---------------------------------------------------------------------------

#[test]
fn expired_proof_reports_expired() {
    let prover = ZkpAddressProver::new(ProofConfig::default());
    for alg in [Algorithm::Schnorr, Algorithm::Pedersen] {
        let issued = prover
            .create(
                &tokyo_address(),
                ProofOptions::new().algorithm(alg).expires_in(-1),
            )
            .unwrap();
        let proof: ZkpAddressProof = transport(&issued.proof);
        let r = verify_address_proof(&proof, &VerifyOptions::new().with_secret(&issued.secret));
        assert!(!r.valid);
        assert!(r.expired);
    }
}

#[test]
fn proof_is_bound_to_its_secret() {
    let issued = ZkpAddressProver::default()
        .create(&tokyo_address(), ProofOptions::new().secret(secret("A")))
        .unwrap();
    let proof: ZkpAddressProof = transport(&issued.proof);
    let b = secret("B");
    let r = verify_address_proof(&proof, &VerifyOptions::new().with_secret(&b));
    assert!(!r.valid);
    assert_eq!(r.error.map(|e| e.to_string()).as_deref(), Some("Invalid signature"));
}

#[test]
fn only_requested_field_is_disclosed() {
    let addr = tokyo_address();
    let s = secret("disclosure");
    let issued = ZkpAddressProver::default()
        .create(&addr, ProofOptions::new().secret(s.clone()).disclose(&["country"]))
        .unwrap();
    let proof: ZkpAddressProof = transport(&issued.proof);
    let r = verify_address_proof(&proof, &VerifyOptions::new().with_secret(&s));
    assert!(r.valid, "{r:?}");
    let disclosed = r.disclosed_fields.as_ref().expect("disclosed fields");
    assert_eq!(disclosed.get("country").map(String::as_str), addr.get("country"));
    assert_eq!(disclosed.len(), 1);

    let result_json = serde_json::to_string(&r).unwrap();
    for hidden in ["Taro Yamada", "Jingumae", "Shibuya", "150-0001"] {
        assert!(!result_json.contains(hidden), "{hidden} leaked");
    }
}

#[test]
fn replayed_proof_rejected() {
    let guard = MemoryReplayGuard::new();
    let issued = ZkpAddressProver::default()
        .create(&tokyo_address(), ProofOptions::new())
        .unwrap();
    let opts = VerifyOptions::new()
        .with_secret(&issued.secret)
        .with_replay_guard(&guard);
    assert!(verify_address_proof(&transport(&issued.proof), &opts).valid);
    let r = verify_address_proof(&transport(&issued.proof), &opts);
    assert_eq!(r.error, Some(VerifyFailure::Replayed));
}

#[test]
fn verifier_clock_is_injectable() {
    let now = Timestamp::parse("2026-03-01T09:00:00Z").unwrap();
    let issued = ZkpAddressProver::default()
        .create_at(&tokyo_address(), ProofOptions::new().expires_in(600), now)
        .unwrap();
    let s = &issued.secret;
    let before = now.checked_add_secs(599).unwrap();
    let after = now.checked_add_secs(600).unwrap();
    assert!(verify_address_proof(&issued.proof, &VerifyOptions::new().with_secret(s).at(before)).valid);
    assert!(verify_address_proof(&issued.proof, &VerifyOptions::new().with_secret(s).at(after)).expired);
}

#[test]
fn legacy_and_current_envelopes_share_one_entry_point() {
    let s = secret("shared");
    let v1 = LegacyAddressProof::create(&tokyo_address(), &s, 3600)
        .unwrap()
        .to_json()
        .unwrap();
    let v2 = ZkpAddressProver::default()
        .create(&tokyo_address(), ProofOptions::new().secret(s.clone()))
        .unwrap()
        .proof
        .to_json()
        .unwrap();

    for json in [v1, v2] {
        let proof = AddressProof::from_json(&json).unwrap();
        assert!(proof.verify(&VerifyOptions::new().with_secret(&s)).valid);
        let wrong = secret("other");
        assert_eq!(
            proof.verify(&VerifyOptions::new().with_secret(&wrong)).error,
            Some(VerifyFailure::InvalidSignature)
        );
    }
}

// ---------------------------------------------------------------------------
// Scenario 1: membership
// ---------------------------------------------------------------------------

#[test]
fn membership_scenario() {
    let circuit = CircuitDescriptor::new(CircuitKind::Membership, 1);
    let (p1, p2, p3) = (pid("JP-13-113-01"), pid("JP-13-113-02"), pid("JP-13-113-03"));
    let set = vec![p1.clone(), p2.clone(), p3.clone()];

    let proof = membership::generate(&p2, &set, &circuit).unwrap();
    let proof: ZkMembershipProof = transport(&proof);

    let leaves: Vec<_> = set.iter().map(membership::pid_leaf).collect();
    let root = merkle::calculate_root(&leaves);
    assert_eq!(root, membership::membership_root(&set));
    assert!(membership::verify(&proof, &circuit, &root).valid);

    let without_p2 = membership::membership_root(&[p1, p3]);
    assert!(!membership::verify(&proof, &circuit, &without_p2).valid);
}

// ---------------------------------------------------------------------------
// Scenario 2: version continuity
// ---------------------------------------------------------------------------

#[test]
fn version_continuity_scenario() {
    let circuit = CircuitDescriptor::new(CircuitKind::Version, 1);
    let old = pid("JP-13-113-01");
    let new = pid("JP-27-100-05");
    let owner = secret("owner");

    let witness = version::generate(&old, &new, &owner, b"migration-2026-03", &circuit).unwrap();
    let wire = serde_json::to_string(&witness.proof).unwrap();
    let proof: ZkVersionProof = serde_json::from_str(&wire).unwrap();

    // The registry publishes these; the blindings stay with the owner.
    let old_c = witness.proof.old_pid_commitment;
    let new_c = witness.proof.new_pid_commitment;
    assert!(version::verify(&proof, &circuit, &old_c, &new_c, &VersionChecks::new()).valid);

    let unrelated = version::commit_pid(&pid("JP-01-101-09")).unwrap().commitment;
    assert!(!version::verify(&proof, &circuit, &old_c, &unrelated, &VersionChecks::new()).valid);

    let revoked = RevocationList::from_commitments([old_c]);
    let checks = VersionChecks::new()
        .with_openings(
            PidOpening::new(&old, &witness.old_opening),
            PidOpening::new(&new, &witness.new_opening),
        )
        .with_revocation_list(&revoked);
    assert!(version::verify(&proof, &circuit, &old_c, &new_c, &checks).valid);
}

#[test]
fn version_proof_resists_pid_enumeration() {
    let circuit = CircuitDescriptor::new(CircuitKind::Version, 1);
    let old = pid("JP-13-113-01");
    let new = pid("JP-27-100-05");
    let witness = version::generate(&old, &new, &secret("owner"), b"m-1", &circuit).unwrap();
    let proof: ZkVersionProof = transport(&witness.proof);

    // An observer with the proof and a candidate PID list, but no blindings.
    let fresh = Blinding::random().unwrap();
    let candidates = ["JP-13-113-01", "JP-13-113-02", "JP-27-100-05", "JP-27-100-06"];
    for c in candidates.iter().map(|s| pid(s)) {
        let guess = PidOpening::new(&c, &fresh);
        assert!(!guess.opens(&proof.old_pid_commitment));
        assert!(!guess.opens(&proof.new_pid_commitment));
        assert_ne!(version::commit_pid(&c).unwrap().commitment, proof.old_pid_commitment);
    }
    assert!(PidOpening::new(&old, &witness.old_opening).opens(&proof.old_pid_commitment));
}

// ---------------------------------------------------------------------------
// Scenario 3: locker
// ---------------------------------------------------------------------------

#[test]
fn locker_scenario() {
    let circuit = CircuitDescriptor::new(CircuitKind::Locker, 1);
    let facility = FacilityId::new("FAC-TOKYO-SHIBUYA-07").unwrap();
    let lockers = [
        "LOCKER-A-040",
        "LOCKER-A-041",
        "LOCKER-A-042",
        "LOCKER-A-043",
        "LOCKER-B-010",
        "LOCKER-B-011",
        "LOCKER-B-012",
    ];
    let root = locker::locker_set_root(&facility, &lockers);

    let proof = locker::generate("LOCKER-A-042", &facility, &lockers, &circuit, Some("A")).unwrap();
    let wire = serde_json::to_string(&proof).unwrap();
    assert!(!wire.contains("LOCKER-A-042"));

    let proof: ZkLockerProof = serde_json::from_str(&wire).unwrap();
    let result = locker::verify(&proof, &circuit, &root, Some(&facility));
    assert!(result.valid);
    let result_json = serde_json::to_string(&result).unwrap();
    assert!(!result_json.contains("LOCKER-A-042"));
}

// ---------------------------------------------------------------------------
// Structure under policy
// ---------------------------------------------------------------------------

#[test]
fn structure_proof_follows_configured_policy() {
    let circuit = CircuitDescriptor::new(CircuitKind::Structure, 1);
    let jp = CountryCode::new("JP").unwrap();
    let witness = structure::generate(
        &pid("JP-13-113-01"),
        &jp,
        4,
        &circuit,
        &HierarchyRules::default(),
    )
    .unwrap();
    let proof: ZkStructureProof = transport(&witness.proof);

    let dev: ProofConfig = serde_json::from_str(r#"{"policy":"development"}"#).unwrap();
    let prod: ProofConfig = serde_json::from_str(r#"{"policy":"production"}"#).unwrap();

    let r = structure::verify(&proof, &circuit, Some(&jp), &ProofPolicy::from(dev.policy));
    assert!(r.valid, "{r:?}");
    let r = structure::verify(&proof, &circuit, Some(&jp), &ProofPolicy::from(prod.policy));
    assert_eq!(r.error, Some(VerifyFailure::BackendRejected));
}

#[test]
fn proofs_do_not_cross_circuits() {
    let membership_circuit = CircuitDescriptor::new(CircuitKind::Membership, 1);
    let locker_circuit = CircuitDescriptor::new(CircuitKind::Locker, 1);
    let facility = FacilityId::new("FAC-1").unwrap();
    let lockers = ["L-1", "L-2", "L-3"];
    let root = locker::locker_set_root(&facility, &lockers);
    let proof = locker::generate("L-2", &facility, &lockers, &locker_circuit, None).unwrap();

    let as_membership = ZkMembershipProof {
        circuit: proof.circuit,
        merkle: proof.merkle.clone(),
        generated_at: proof.generated_at,
    };
    assert_eq!(
        membership::verify(&as_membership, &membership_circuit, &root).error,
        Some(VerifyFailure::CircuitMismatch)
    );
}
