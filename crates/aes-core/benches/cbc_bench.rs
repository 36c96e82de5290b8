use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use aes_core::{decrypt_block, expand_key, Aes128, Aes128Cbc, Aes128Key};

fn bench_key_schedule(c: &mut Criterion) {
    let key = Aes128Key::from([0u8; 16]);
    let mut group = c.benchmark_group("key_schedule");
    group.bench_function("expand_key", |b| {
        b.iter(|| expand_key(&key));
    });
    group.finish();
}

fn bench_block(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
    let mut key_bytes = [0u8; 16];
    let mut block = [0u8; 16];
    rng.fill_bytes(&mut key_bytes);
    rng.fill_bytes(&mut block);
    let key = Aes128Key::from(key_bytes);
    let round_keys = expand_key(&key);
    let aes = Aes128::new(&key);

    let mut group = c.benchmark_group("block");
    group.throughput(Throughput::Bytes(16));
    group.bench_function("decrypt_block", |b| {
        b.iter(|| decrypt_block(&block, &round_keys));
    });
    group.bench_function("encrypt_block", |b| {
        b.iter(|| aes.encrypt_block(&block));
    });
    group.finish();
}

fn bench_cbc(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([4u8; 32]);
    let mut key = [0u8; 16];
    let mut iv = [0u8; 16];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut iv);
    let cbc = Aes128Cbc::new(&key, &iv).expect("valid key and iv");

    let mut message = vec![0u8; 4096];
    rng.fill_bytes(&mut message);
    let ciphertext = cbc.encrypt(&message).expect("encrypt");

    let mut group = c.benchmark_group("cbc");
    group.sample_size(20);
    group.throughput(Throughput::Bytes(message.len() as u64));
    group.bench_function("decrypt_4k", |b| {
        b.iter(|| cbc.decrypt(&ciphertext).expect("decrypt"));
    });
    group.bench_function("encrypt_4k", |b| {
        b.iter(|| cbc.encrypt(&message).expect("encrypt"));
    });
    group.finish();
}

criterion_group!(benches, bench_key_schedule, bench_block, bench_cbc);
criterion_main!(benches);
