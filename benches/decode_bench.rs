use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gw2link::{assemble, layout::*, RawFields};

fn producer_image() -> [u8; LINK_SIZE] {
    let mut image = [0u8; LINK_SIZE];
    let mut put_text = |offset: usize, text: &str| {
        for (i, unit) in text.encode_utf16().enumerate() {
            image[offset + i * 2..offset + i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
        }
    };
    put_text(NAME_OFFSET, PRODUCER_MARKER);
    put_text(
        IDENTITY_OFFSET,
        r#"{"name":"Foo","profession":1,"race":0,"map_id":15,"world_id":1001,"team_color_id":0,"commander":false,"fov":1.222}"#,
    );
    image[VERSION_OFFSET..VERSION_OFFSET + 4].copy_from_slice(&2u32.to_le_bytes());
    image[CONTEXT_LEN_OFFSET..CONTEXT_LEN_OFFSET + 4].copy_from_slice(&88u32.to_le_bytes());
    image[CONTEXT_OFFSET..CONTEXT_OFFSET + 2].copy_from_slice(&2u16.to_le_bytes());
    image[CONTEXT_OFFSET + 2..CONTEXT_OFFSET + 4].copy_from_slice(&24000u16.to_be_bytes());
    image
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decode");
    let image = producer_image();

    group.bench_function("raw_fields", |b| {
        b.iter(|| {
            let raw = RawFields::decode(black_box(&image));
            black_box(raw.has_marker())
        });
    });

    group.bench_function("assemble", |b| {
        b.iter(|| {
            let raw = RawFields::decode(black_box(&image));
            black_box(assemble(&raw).unwrap())
        });
    });

    let mut foreign = image;
    foreign[NAME_OFFSET..NAME_OFFSET + 2].copy_from_slice(&u16::from(b'X').to_le_bytes());
    group.bench_function("assemble_no_producer", |b| {
        b.iter(|| {
            let raw = RawFields::decode(black_box(&foreign));
            black_box(assemble(&raw).unwrap())
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_decode);
criterion_main!(benches);
