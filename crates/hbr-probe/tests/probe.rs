//! Route selection over whole payloads and files.

use hbr_core::{Codec, DecodeError, Magic};
use hbr_probe::{ingest, Format, PayloadProber, ProbeOptions, Route, Source};
use hbr_test_utils::{
    deflate_zlib, gzip, length_framed, lz4_frame, zstd_frame, ReplayFixture,
};
use proptest::prelude::*;
use serde_json::{json, Value};

// ── Helpers ─────────────────────────────────────────────────────

fn ticks_json(n: usize) -> Vec<u8> {
    let ticks: Vec<Value> = (0..n).map(|t| json!({"tick": t, "ball": [t, -1.5]})).collect();
    serde_json::to_vec(&json!({ "ticks": ticks })).unwrap()
}

fn msgpack_stream(n: usize) -> Vec<u8> {
    (0..n)
        .flat_map(|t| rmp_serde::to_vec_named(&json!({"tick": t})).unwrap())
        .collect()
}

fn cbor_array(n: usize) -> Vec<u8> {
    let ticks: Vec<Value> = (0..n).map(|t| json!({"tick": t})).collect();
    let mut out = Vec::new();
    ciborium::ser::into_writer(&Value::Array(ticks), &mut out).unwrap();
    out
}

fn probe(payload: &[u8]) -> hbr_probe::Probe {
    PayloadProber::default().probe(payload).unwrap()
}

fn inflated(codec: Codec, format: Format) -> Route {
    Route {
        source: Source::Inflated(codec),
        format,
    }
}

// ── Routes ──────────────────────────────────────────────────────

#[test]
fn each_codec_is_reachable() {
    let json = ticks_json(20);
    let cases = [
        (deflate_zlib(&json), Codec::Zlib),
        (gzip(&json), Codec::Gzip),
        (lz4_frame(&json), Codec::Lz4Frame),
        (zstd_frame(&json), Codec::Zstd),
    ];
    for (payload, codec) in cases {
        let p = probe(&payload);
        assert_eq!(p.route, inflated(codec, Format::Json));
        assert_eq!(p.ticks.len(), 20);
    }
}

#[test]
fn binary_formats_after_decompression() {
    let p = probe(&zstd_frame(&msgpack_stream(4)));
    assert_eq!(p.route.label(), "zstd+msgpack");
    assert_eq!(p.ticks[3]["tick"], 3);

    let p = probe(&gzip(&cbor_array(2)));
    assert_eq!(p.route.label(), "gzip+cbor");
}

#[test]
fn raw_msgpack_comes_last() {
    let p = probe(&msgpack_stream(5));
    assert_eq!(p.route, Route::raw(Format::Msgpack));
    assert_eq!(p.ticks.len(), 5);
}

#[test]
fn raw_cbor() {
    let p = probe(&cbor_array(2));
    assert_eq!(p.route, Route::raw(Format::Cbor));
}

#[test]
fn framed_mixture_of_blob_encodings() {
    let a = ticks_json(1);
    let b = deflate_zlib(b"{\"tick\":10}\n{\"tick\":11}\n");
    let c = msgpack_stream(1);
    let payload = length_framed([a.as_slice(), b.as_slice(), c.as_slice()]);
    let p = probe(&payload);
    assert_eq!(p.route.label(), "framed");
    let ticks: Vec<_> = p.ticks.iter().map(|t| t["tick"].clone()).collect();
    assert_eq!(ticks, [json!(0), json!(10), json!(11), json!(0)]);
}

#[test]
fn tick_keys_keep_source_order() {
    let p = probe(br#"[{"z":1,"a":2,"m":3}]"#);
    let keys: Vec<_> = p.ticks[0].keys().map(String::as_str).collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn frame_limit_is_honoured() {
    let blob = ticks_json(1);
    let payload = length_framed([blob.as_slice(), blob.as_slice()]);
    let prober = PayloadProber::new(ProbeOptions {
        max_frame_len: blob.len() - 1,
        ..Default::default()
    })
    .unwrap();
    assert!(prober.probe(&payload).is_err());
    assert_eq!(probe(&payload).route.label(), "framed");
}

#[test]
fn nothing_matches() {
    let err = PayloadProber::default().probe(&[0xc1; 16]).unwrap_err();
    assert!(matches!(err, DecodeError::NoDecodeRouteMatched { offset: 0, .. }));
}

// ── Ingest ──────────────────────────────────────────────────────

#[test]
fn ingest_compressed_dump() {
    let file = ReplayFixture::modern(12)
        .stored()
        .payload(gzip(&ticks_json(2)))
        .build();
    let loose = ingest(&file).unwrap();
    assert_eq!(loose.header.magic, Magic::Hbr2);
    assert_eq!(loose.header.version, 12);
    assert_eq!(loose.payload_offset, 12);
    assert_eq!(loose.route.label(), "gzip+json");
    assert_eq!(loose.ticks.len(), 2);
    assert!(loose.header_json.is_none());
}

#[test]
fn ingest_json_header_before_stream() {
    let mut payload = br#"{"recorder":"bot","fps":60}"#.to_vec();
    let header_len = payload.len();
    payload.extend(zstd_frame(&ticks_json(20)));
    let file = ReplayFixture::modern(12)
        .stored()
        .payload(payload)
        .build();

    let loose = ingest(&file).unwrap();
    let header = loose.header_json.unwrap();
    assert_eq!(header["fps"], 60);
    assert_eq!(loose.payload_offset, 12 + header_len);
    assert_eq!(loose.route.label(), "zstd+json");
}

#[test]
fn ingest_errors_point_into_the_file() {
    let file = ReplayFixture::modern(12)
        .stored()
        .payload(vec![0x78, 0x9c, 0xff, 0xff])
        .build();
    match ingest(&file).unwrap_err() {
        DecodeError::NoDecodeRouteMatched { offset, .. } => assert_eq!(offset, 12),
        other => panic!("unexpected error {other:?}"),
    }
}

proptest! {
    #[test]
    fn valid_json_wins_over_every_other_route(n in 1usize..20, key in "[a-z]{1,8}") {
        let ticks: Vec<Value> = (0..n).map(|i| json!({ key.as_str(): i })).collect();
        let bytes = serde_json::to_vec(&ticks).unwrap();
        let p = probe(&bytes);
        prop_assert_eq!(p.route, Route::raw(Format::Json));
        prop_assert_eq!(p.ticks.len(), n);
    }
}
