use rand::SeedableRng;
use rand::rngs::StdRng;
use zkdilithium::{Params, Signature, SigningKey, VerifyingKey};

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(Params::ZK_DILITHIUM, &mut rng).expect("keygen");
    let vk = VerifyingKey::from(&sk);

    let sk_bytes = bincode::serialize(&sk).expect("serialize sk");
    let vk_bytes = bincode::serialize(&vk).expect("serialize vk");

    // pad to whole field elements
    let mut msg = b"hello zkdilithium".to_vec();
    msg.resize(msg.len().next_multiple_of(3), 0);

    let sig = sk.sign(&msg).expect("sign");
    let sig_bytes = bincode::serialize(&sig).expect("serialize sig");
    let wire = sig.to_bytes().expect("pack sig");
    println!(
        "signature: {} bytes packed, {} bytes bincode",
        wire.len(),
        sig_bytes.len()
    );

    let sk2: SigningKey = bincode::deserialize(&sk_bytes).expect("deserialize sk");
    let vk2: VerifyingKey = bincode::deserialize(&vk_bytes).expect("deserialize vk");
    let sig2: Signature = bincode::deserialize(&sig_bytes).expect("deserialize sig");

    assert!(vk2.verify(&msg, &sig2));

    let unpacked = Signature::from_bytes(vk2.params(), &wire).expect("unpack sig");
    assert!(vk2.verify(&msg, &unpacked));
    assert_eq!(sk2.sign(&msg).expect("sign"), sig);
}
