//! End-to-end SoundBank round-trip and mutation tests

use pretty_assertions::assert_eq;

use hellwise::io::BoundedWriter;
use hellwise::wwise::bank::{encode_bank, parse_bank_bytes, BankHeader, ChunkSlot, OpaqueChunk, SoundBank};
use hellwise::wwise::hierarchy::{
    ActorMixer, Action, BaseParameter, Event, HircCollection, HircObject, PlayListItem,
    RanSeqCntr, Sound, SourceDescriptor, UnknownHirc,
};
use hellwise::wwise::props::{PropBundle, Property, RangePropBundle};

const SOUND_ID: u32 = 0x1000;
const CNTR_ID: u32 = 0x2000;
const MIXER_ID: u32 = 0x2100;
const EVENT_ID: u32 = 0x3000;
const ACTION_ID: u32 = 0x3001;

fn sound(id: u32, parent: u32, source_id: u32, media_size: u32) -> HircObject {
    HircObject::Sound(Sound {
        id,
        source: SourceDescriptor {
            plugin_id: 0x0004_0001,
            stream_type: 0,
            source_id,
            in_memory_media_size: media_size,
            source_bits: 0,
        },
        base: BaseParameter {
            direct_parent_id: parent,
            ..BaseParameter::default()
        },
    })
}

fn test_bank() -> SoundBank {
    let mut objects = HircCollection::default();
    objects.push(sound(SOUND_ID, CNTR_ID, 77, 4));
    objects.push(HircObject::RanSeqCntr(RanSeqCntr {
        id: CNTR_ID,
        base: BaseParameter {
            direct_parent_id: MIXER_ID,
            ..BaseParameter::default()
        },
        loop_count: 1,
        loop_mod_min: 0,
        loop_mod_max: 0,
        transition_time: 0.0,
        transition_time_mod_min: 0.0,
        transition_time_mod_max: 0.0,
        avoid_repeat_count: 2,
        transition_mode: 0,
        random_mode: 0,
        mode: 0,
        flags: 0x12,
        children: vec![SOUND_ID],
        playlist: vec![PlayListItem {
            id: SOUND_ID,
            weight: 50000,
        }],
    }));
    objects.push(HircObject::ActorMixer(ActorMixer {
        id: MIXER_ID,
        base: BaseParameter::default(),
        children: vec![CNTR_ID],
    }));
    objects.push(HircObject::Event(Event {
        id: EVENT_ID,
        action_ids: vec![ACTION_ID],
    }));
    objects.push(HircObject::Action(Action {
        id: ACTION_ID,
        action_type: 0x0403,
        target_id: CNTR_ID,
        is_bus: 0,
        props: PropBundle::new(),
        ranged_props: RangePropBundle::new(),
        tail: vec![0x04, 0x00],
    }));
    objects.push(HircObject::Unknown(UnknownHirc {
        tag: 0x33,
        data: vec![0xEF, 0xBE, 0xAD, 0xDE, 1, 2, 3, 4],
    }));

    let mut bank = SoundBank {
        header: BankHeader {
            version: 141,
            id: 0x6007_2024,
            language: 0,
            alignment: 16,
            device_allocated: 0,
            project: 1234,
            tail: Vec::new(),
        },
        hierarchy: Some(objects),
        opaque: vec![OpaqueChunk {
            tag: *b"STID",
            data: vec![1, 0, 0, 0, 9],
        }],
        order: vec![ChunkSlot::Header],
        ..SoundBank::default()
    };
    bank.append_audio(77, &[0x11, 0x22, 0x33, 0x44]).unwrap();
    bank.order.push(ChunkSlot::Hierarchy);
    bank.order.push(ChunkSlot::Opaque(0));
    bank
}

fn encode_object(object: &HircObject) -> Vec<u8> {
    let mut w = BoundedWriter::new(object.record_size(), "record");
    object.encode(&mut w).unwrap();
    w.finish().unwrap()
}

#[test]
fn unmutated_bank_round_trips_byte_identical() {
    let bank = test_bank();
    let bytes = encode_bank(&bank).unwrap();
    let reparsed = parse_bank_bytes(&bytes).unwrap();
    assert_eq!(reparsed, bank);
    assert_eq!(encode_bank(&reparsed).unwrap(), bytes);
}

#[test]
fn append_audio_and_rewire_touches_only_the_expected_bytes() {
    let bank = test_bank();
    let before = parse_bank_bytes(&encode_bank(&bank).unwrap()).unwrap();

    let mut edited = before.clone();
    let wem = [0xAB; 100];
    edited.append_audio(26007159, &wem).unwrap();
    edited.set_sound_source(SOUND_ID, 26007159).unwrap();
    let edited = parse_bank_bytes(&encode_bank(&edited).unwrap()).unwrap();

    // Header and opaque chunks are untouched.
    assert_eq!(edited.header, before.header);
    assert_eq!(edited.opaque, before.opaque);

    // The media index gained exactly one record; the new audio reads
    // back; the old audio is still where it was.
    assert_eq!(edited.media_index.len(), before.media_index.len() + 1);
    assert_eq!(edited.audio(26007159).unwrap(), &wem);
    assert_eq!(edited.audio(77).unwrap(), before.audio(77).unwrap());

    // Every hierarchy object except the rewired Sound re-encodes
    // byte-identical.
    let before_objects = &before.hierarchy.as_ref().unwrap().objects;
    let edited_objects = &edited.hierarchy.as_ref().unwrap().objects;
    assert_eq!(before_objects.len(), edited_objects.len());
    for (old, new) in before_objects.iter().zip(edited_objects) {
        if old.id().unwrap() == SOUND_ID {
            assert_ne!(encode_object(old), encode_object(new));
            match new {
                HircObject::Sound(sound) => {
                    assert_eq!(sound.source.source_id, 26007159);
                    assert_eq!(sound.source.in_memory_media_size, 100);
                }
                other => panic!("expected a Sound, got {:?}", other.kind()),
            }
        } else {
            assert_eq!(encode_object(old), encode_object(new));
        }
    }
}

#[test]
fn remove_leaf_clears_playlist_and_parent_then_readd_succeeds() {
    let mut bank = test_bank();
    let objects = bank.hierarchy.as_mut().unwrap();

    objects.remove_leaf(CNTR_ID, SOUND_ID).unwrap();
    match objects.get(CNTR_ID).unwrap() {
        HircObject::RanSeqCntr(cntr) => {
            assert!(cntr.children.is_empty());
            assert!(cntr.playlist.is_empty());
        }
        _ => unreachable!(),
    }
    assert_eq!(objects.get(SOUND_ID).unwrap().parent_id(), Some(0));

    objects.add_leaf(CNTR_ID, SOUND_ID).unwrap();
    objects.add_playlist_item(CNTR_ID, SOUND_ID).unwrap();
    assert_eq!(objects.get(SOUND_ID).unwrap().parent_id(), Some(CNTR_ID));

    // The whole edited bank still encodes to its computed size and
    // survives a round trip.
    let bytes = encode_bank(&bank).unwrap();
    assert_eq!(parse_bank_bytes(&bytes).unwrap(), bank);
}

#[test]
fn containment_stays_symmetric_through_mutations() {
    let mut bank = test_bank();
    let objects = bank.hierarchy.as_mut().unwrap();
    objects.push(sound(0x1001, 0, 77, 4));
    objects.add_leaf(MIXER_ID, 0x1001).unwrap();
    objects.reparent(0x1001, CNTR_ID).unwrap();

    // For every object with a parent, the parent lists it; for every
    // child list entry, the child points back.
    let all: Vec<HircObject> = objects.objects.clone();
    for object in &all {
        if let Some(parent_id) = object.parent_id() {
            if parent_id != 0 {
                let parent = objects.get(parent_id).unwrap();
                assert!(parent.child_ids().contains(&object.id().unwrap()));
            }
        }
        for &child_id in object.child_ids() {
            let child = objects.get(child_id).unwrap();
            assert_eq!(child.parent_id(), Some(object.id().unwrap()));
        }
    }
}

#[test]
fn property_edits_follow_the_bank_version() {
    let mut bank = test_bank();
    let version = bank.version();
    let objects = bank.hierarchy.as_mut().unwrap();

    let base = objects
        .get_mut(SOUND_ID)
        .unwrap()
        .base_params_mut()
        .unwrap();
    base.props.set_base(version, Property::Volume, -6.0).unwrap();
    base.props
        .set_base(version, Property::InitialDelay, 0.5)
        .unwrap();

    let bytes = encode_bank(&bank).unwrap();
    let reparsed = parse_bank_bytes(&bytes).unwrap();
    let base = reparsed
        .hierarchy
        .as_ref()
        .unwrap()
        .get(SOUND_ID)
        .unwrap()
        .base_params()
        .unwrap();
    assert_eq!(
        base.props.get_base(version, Property::Volume).unwrap(),
        Some(-6.0)
    );
    assert_eq!(
        base.props.get_base(version, Property::InitialDelay).unwrap(),
        Some(0.5)
    );
}
