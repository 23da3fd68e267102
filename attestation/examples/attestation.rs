use attestation::{
    AttestationCrypto, AttestationType, Commitment, EncodedProof, ProofOfExponent,
    address_from_public_key,
};
use curve::{Scalar, bn254, secp256k1};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let crypto = AttestationCrypto::new();

    // The user asks for an attestation of their address.
    let user_secret = crypto.make_secret(&mut rng).expect("user secret");
    let request = crypto
        .prove_attestation_request(&user_secret, &mut rng)
        .expect("prove request");
    let request_bytes = bincode::serialize(&request.encode()).expect("serialize request");

    // The issuer checks the request and commits to the address it vouches for.
    let request: EncodedProof = bincode::deserialize(&request_bytes).expect("deserialize request");
    let request = ProofOfExponent::decode(&request, bn254()).expect("decode request");
    assert!(crypto.verify_attestation_request(&request).expect("verify request"));

    let issuer_secret = crypto.make_secret(&mut rng).expect("issuer secret");
    let attested = crypto
        .commit("alice@example.com", AttestationType::Mail, &issuer_secret)
        .expect("commit");
    let attested_bytes = bincode::serialize(&attested).expect("serialize commitment");

    // Later the user links a fresh commitment of theirs to the attestation.
    let attested: Commitment = bincode::deserialize(&attested_bytes).expect("deserialize commitment");
    let own = crypto
        .commit("alice@example.com", AttestationType::Mail, &user_secret)
        .expect("commit");
    let link = crypto
        .prove_equality(&own, &attested, &user_secret, &issuer_secret, &mut rng)
        .expect("prove equality");
    let link_bytes = bincode::serialize(&link.encode()).expect("serialize link");

    let link: EncodedProof = bincode::deserialize(&link_bytes).expect("deserialize link");
    let link = ProofOfExponent::decode(&link, bn254()).expect("decode link");
    assert!(crypto.verify_equality(&own, &attested, &link).expect("verify equality"));

    // The attestation is bound to the holder's account key.
    let curve = secp256k1();
    let account_key = curve.generator() * Scalar::from_u64(1, curve);
    let address = address_from_public_key(&account_key).expect("address");
    println!("attested alice@example.com for {address}");
    println!("equality proof: {} bytes", link_bytes.len());
}
