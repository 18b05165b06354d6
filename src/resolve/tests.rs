use alloc::borrow::Cow;

use tinystr::tinystr;

use crate::changeset::{Changeset, ErrorContext, RecordState};
use crate::fields::FieldMapping;
use crate::policy::{PolicyDecision, ResolutionPolicy, UseEarlier, UseLater};
use crate::provider::{
    CivilDateTime, EpochSeconds, FixedRuleProvider, InstantAndOffset, LocalDateTime, LocalMapping,
    OffsetInfo, TimeZoneOffsetProvider, TimeZoneProviderError, ZoneRules,
};
use crate::resolve::resolve_local_datetime;
use crate::ErrorKind;

use icu_calendar::AnyCalendarKind;

const PLUS_ONE: OffsetInfo = OffsetInfo {
    utc_offset: crate::provider::UtcOffsetSeconds(3600),
    std_offset: crate::provider::UtcOffsetSeconds(0),
    abbreviation: tinystr!(10, "PLUS1"),
};
const PLUS_TWO: OffsetInfo = OffsetInfo {
    utc_offset: crate::provider::UtcOffsetSeconds(3600),
    std_offset: crate::provider::UtcOffsetSeconds(3600),
    abbreviation: tinystr!(10, "PLUS2"),
};

// 2019-01-01T09:00:00Z, i.e. local 2019-01-01T10:00:00 at +01:00.
const NINE_UTC: i64 = 1_546_333_200;
// 2019-01-01T08:00:00Z, i.e. local 2019-01-01T10:00:00 at +02:00.
const EIGHT_UTC: i64 = 1_546_329_600;
// 2019-02-01T22:00:00Z, the post-gap boundary of the gap scenario.
const GAP_AFTER: i64 = 1_549_058_400;

/// Serves canned mappings keyed by zone identifier, so each provider
/// outcome can be exercised without constructing real transition tables.
struct ScenarioProvider;

impl TimeZoneOffsetProvider for ScenarioProvider {
    fn offset_for_local(
        &self,
        _: LocalDateTime,
        zone: &str,
    ) -> Result<LocalMapping, TimeZoneProviderError> {
        match zone {
            "Scenario/Unique" => Ok(LocalMapping::Unique(InstantAndOffset::new(
                EpochSeconds(NINE_UTC),
                PLUS_ONE,
            ))),
            "Scenario/Ambiguous" => Ok(LocalMapping::Ambiguous([
                InstantAndOffset::new(EpochSeconds(NINE_UTC), PLUS_ONE),
                InstantAndOffset::new(EpochSeconds(EIGHT_UTC), PLUS_TWO),
            ])),
            "Scenario/Gap" => Ok(LocalMapping::Gap([
                InstantAndOffset::new(EpochSeconds(GAP_AFTER - 1), PLUS_ONE),
                InstantAndOffset::new(EpochSeconds(GAP_AFTER), PLUS_TWO),
            ])),
            "Scenario/Buddhist" => Ok(LocalMapping::IncompatibleCalendar(
                AnyCalendarKind::Buddhist,
            )),
            "Scenario/OutOfRange" => Err(TimeZoneProviderError::InstantOutOfRange),
            "Scenario/Broken" => Err(TimeZoneProviderError::Assert("broken zone table")),
            _ => Err(TimeZoneProviderError::ZoneNotFound),
        }
    }

    fn offset_for_instant(
        &self,
        _: EpochSeconds,
        _: &str,
    ) -> Result<OffsetInfo, TimeZoneProviderError> {
        unimplemented!("resolution never looks up by instant")
    }
}

fn staged(zone: &str) -> Changeset {
    let mut record = Changeset::new();
    let civil = CivilDateTime::try_new(2019, 1, 1, 10, 0, 0).unwrap();
    record.set_local_datetime("input_datetime", LocalDateTime::new(civil));
    record.set_zone_identifier("time_zone", zone);
    record
}

fn derived(record: &Changeset) -> Option<(EpochSeconds, i64)> {
    match (
        record.instant("datetime"),
        record.offset_seconds("original_offset"),
    ) {
        (Some(instant), Some(offset)) => Some((instant, offset)),
        (None, None) => None,
        other => panic!("instant and offset must be written together, got {other:?}"),
    }
}

#[test]
fn unique_mapping_is_applied_directly() {
    let mut record = staged("Scenario/Unique");
    resolve_local_datetime(
        &mut record,
        &FieldMapping::default(),
        &UseEarlier,
        &ScenarioProvider,
    )
    .unwrap();
    assert!(record.is_valid());
    assert_eq!(derived(&record), Some((EpochSeconds(NINE_UTC), 3600)));
}

#[test]
fn ambiguous_earlier_policy_takes_first_candidate() {
    let mut record = staged("Scenario/Ambiguous");
    resolve_local_datetime(
        &mut record,
        &FieldMapping::default(),
        &UseEarlier,
        &ScenarioProvider,
    )
    .unwrap();
    assert_eq!(derived(&record), Some((EpochSeconds(NINE_UTC), 3600)));
}

#[test]
fn ambiguous_later_policy_takes_second_candidate() {
    let mut record = staged("Scenario/Ambiguous");
    resolve_local_datetime(
        &mut record,
        &FieldMapping::default(),
        &UseLater,
        &ScenarioProvider,
    )
    .unwrap();
    // The recorded offset tracks the applied candidate: 3600 + 3600.
    assert_eq!(derived(&record), Some((EpochSeconds(EIGHT_UTC), 7200)));
}

#[test]
fn gap_boundaries_reach_the_policy_in_order() {
    let mut record = staged("Scenario/Gap");
    resolve_local_datetime(
        &mut record,
        &FieldMapping::default(),
        &UseLater,
        &ScenarioProvider,
    )
    .unwrap();
    assert_eq!(derived(&record), Some((EpochSeconds(GAP_AFTER), 7200)));

    let mut record = staged("Scenario/Gap");
    resolve_local_datetime(
        &mut record,
        &FieldMapping::default(),
        &UseEarlier,
        &ScenarioProvider,
    )
    .unwrap();
    assert_eq!(derived(&record), Some((EpochSeconds(GAP_AFTER - 1), 3600)));
}

#[test]
fn absent_inputs_pass_through() {
    let mut record = Changeset::new();
    record.set_zone_identifier("time_zone", "Scenario/Unique");
    resolve_local_datetime(
        &mut record,
        &FieldMapping::default(),
        &UseEarlier,
        &ScenarioProvider,
    )
    .unwrap();
    assert!(record.is_valid());
    assert_eq!(derived(&record), None);

    let mut record = Changeset::new();
    let civil = CivilDateTime::try_new(2019, 1, 1, 10, 0, 0).unwrap();
    record.set_local_datetime("input_datetime", LocalDateTime::new(civil));
    resolve_local_datetime(
        &mut record,
        &FieldMapping::default(),
        &UseEarlier,
        &ScenarioProvider,
    )
    .unwrap();
    assert_eq!(derived(&record), None);
}

#[test]
fn unchanged_inputs_pass_through() {
    let mut record = staged("Scenario/Unique");
    record.clear_changes();
    resolve_local_datetime(
        &mut record,
        &FieldMapping::default(),
        &UseEarlier,
        &ScenarioProvider,
    )
    .unwrap();
    assert_eq!(derived(&record), None);
}

#[test]
fn prior_validation_error_skips_resolution() {
    let mut record = staged("Scenario/Unique");
    record.add_error("time_zone", "is not allowed", None);
    resolve_local_datetime(
        &mut record,
        &FieldMapping::default(),
        &UseEarlier,
        &ScenarioProvider,
    )
    .unwrap();
    assert_eq!(derived(&record), None);
    assert_eq!(record.errors().len(), 1);
}

#[test]
fn unknown_zone_attaches_error_to_zone_field() {
    let mut record = staged("Europe/Atlantis");
    resolve_local_datetime(
        &mut record,
        &FieldMapping::default(),
        &UseEarlier,
        &ScenarioProvider,
    )
    .unwrap();
    assert_eq!(derived(&record), None);
    let [error] = record.errors() else {
        panic!("expected exactly one error, got {:?}", record.errors());
    };
    assert_eq!(error.field, "time_zone");
    assert_eq!(error.message, "is invalid");
    assert_eq!(error.context, None);
}

#[test]
fn out_of_range_local_attaches_error_to_input_field() {
    let mut record = staged("Scenario/OutOfRange");
    resolve_local_datetime(
        &mut record,
        &FieldMapping::default(),
        &UseEarlier,
        &ScenarioProvider,
    )
    .unwrap();
    assert_eq!(derived(&record), None);
    let [error] = record.errors() else {
        panic!("expected exactly one error, got {:?}", record.errors());
    };
    assert_eq!(error.field, "input_datetime");
    assert_eq!(error.message, "is invalid");
}

#[test]
fn incompatible_calendar_default_carries_context() {
    let mut record = staged("Scenario/Buddhist");
    resolve_local_datetime(
        &mut record,
        &FieldMapping::default(),
        &UseEarlier,
        &ScenarioProvider,
    )
    .unwrap();
    assert_eq!(derived(&record), None);
    let [error] = record.errors() else {
        panic!("expected exactly one error, got {:?}", record.errors());
    };
    assert_eq!(error.field, "time_zone");
    assert_eq!(
        error.context,
        Some(ErrorContext::Calendar(AnyCalendarKind::Buddhist))
    );
}

#[test]
fn broken_provider_invariant_is_terminal() {
    let mut record = staged("Scenario/Broken");
    let err = resolve_local_datetime(
        &mut record,
        &FieldMapping::default(),
        &UseEarlier,
        &ScenarioProvider,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Assert);
    assert_eq!(derived(&record), None);
}

#[test]
fn invalid_field_mapping_fails_fast() {
    let mapping = FieldMapping {
        datetime: Cow::Borrowed("date-time"),
        ..Default::default()
    };
    let mut record = staged("Scenario/Unique");
    let err =
        resolve_local_datetime(&mut record, &mapping, &UseEarlier, &ScenarioProvider).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
    assert_eq!(derived(&record), None);
}

#[test]
fn custom_field_mapping_is_honored() {
    let mapping = FieldMapping {
        input_datetime: Cow::Borrowed("starts_at_wall"),
        time_zone: Cow::Borrowed("tz"),
        datetime: Cow::Borrowed("starts_at_utc"),
        original_offset: Cow::Borrowed("starts_at_offset"),
    };
    let mut record = Changeset::new();
    let civil = CivilDateTime::try_new(2019, 1, 1, 10, 0, 0).unwrap();
    record.set_local_datetime("starts_at_wall", LocalDateTime::new(civil));
    record.set_zone_identifier("tz", "Scenario/Unique");
    resolve_local_datetime(&mut record, &mapping, &UseEarlier, &ScenarioProvider).unwrap();
    assert_eq!(record.instant("starts_at_utc"), Some(EpochSeconds(NINE_UTC)));
    assert_eq!(record.offset_seconds("starts_at_offset"), Some(3600));
    assert_eq!(record.instant("datetime"), None);
}

/// A policy that rejects ambiguous times outright instead of choosing.
struct RejectAmbiguity;

impl ResolutionPolicy<Changeset> for RejectAmbiguity {
    fn on_ambiguous(
        &self,
        record: &mut Changeset,
        _: InstantAndOffset,
        _: InstantAndOffset,
        fields: &FieldMapping,
    ) -> PolicyDecision {
        record.add_error(&fields.input_datetime, "is ambiguous", None);
        PolicyDecision::Resolved
    }

    fn on_gap(
        &self,
        _: &mut Changeset,
        _: InstantAndOffset,
        after: InstantAndOffset,
        _: &FieldMapping,
    ) -> PolicyDecision {
        PolicyDecision::Apply(after)
    }
}

#[test]
fn policy_may_resolve_the_record_itself() {
    let mut record = staged("Scenario/Ambiguous");
    resolve_local_datetime(
        &mut record,
        &FieldMapping::default(),
        &RejectAmbiguity,
        &ScenarioProvider,
    )
    .unwrap();
    assert_eq!(derived(&record), None);
    let [error] = record.errors() else {
        panic!("expected exactly one error, got {:?}", record.errors());
    };
    assert_eq!(error.field, "input_datetime");
    assert_eq!(error.message, "is ambiguous");
}

#[test]
fn resolves_against_transition_tables() {
    let cest = OffsetInfo::new(3600, 3600, tinystr!(10, "CEST"));
    let provider = FixedRuleProvider::new().with_zone(
        "Europe/Berlin",
        ZoneRules::new(OffsetInfo::new(3600, 0, tinystr!(10, "CET")))
            .with_transition(1_553_994_000, cest),
    );
    let mut record = Changeset::new();
    let civil = CivilDateTime::try_new(2019, 6, 15, 12, 0, 0).unwrap();
    record.set_local_datetime("input_datetime", LocalDateTime::new(civil));
    record.set_zone_identifier("time_zone", "Europe/Berlin");
    resolve_local_datetime(&mut record, &FieldMapping::default(), &UseEarlier, &provider).unwrap();
    assert_eq!(derived(&record), Some((EpochSeconds(1_560_592_800), 7200)));
}
