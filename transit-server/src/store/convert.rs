//! Conversion from store DTOs to domain types.

use tracing::warn;

use crate::domain::{
    Coordinates, IntercityTrip, InvalidCoordinates, Route, RouteStop, Stop, StopOffset, TimeError,
    TimeOfDay,
};

use super::types::{IntercityTripDto, RouteDto, RouteStopDto};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// A time column could not be parsed
    #[error("record {id}: {field}: {source}")]
    InvalidTime {
        id: String,
        field: &'static str,
        source: TimeError,
    },

    /// Stop offsets are minutes after the origin departure
    #[error("record {id}: offset must be non-negative, got {minutes}")]
    InvalidOffset { id: String, minutes: i64 },

    /// Stop position outside the WGS84 range
    #[error("record {id}: {source}")]
    InvalidLocation {
        id: String,
        source: InvalidCoordinates,
    },
}

fn parse_time(id: &str, field: &'static str, value: &str) -> Result<TimeOfDay, ConversionError> {
    TimeOfDay::parse(value).map_err(|source| ConversionError::InvalidTime {
        id: id.to_string(),
        field,
        source,
    })
}

/// Convert a route row.
pub fn convert_route(dto: &RouteDto) -> Result<Route, ConversionError> {
    Ok(Route::new(
        dto.id.clone(),
        dto.title.clone(),
        parse_time(&dto.id, "start_time", &dto.start_time)?,
        parse_time(&dto.id, "end_time", &dto.end_time)?,
        dto.frequency_min,
    ))
}

/// Convert a route-stop row and its embedded stop.
pub fn convert_route_stop(dto: &RouteStopDto) -> Result<RouteStop, ConversionError> {
    let minutes = u32::try_from(dto.minutes_from_start).map_err(|_| {
        ConversionError::InvalidOffset {
            id: dto.id.clone(),
            minutes: dto.minutes_from_start,
        }
    })?;

    let location = Coordinates::new(dto.stop.latitude, dto.stop.longitude).map_err(|source| {
        ConversionError::InvalidLocation {
            id: dto.stop.id.clone(),
            source,
        }
    })?;

    Ok(RouteStop {
        id: dto.id.clone(),
        offset: StopOffset::new(minutes),
        stop: Stop {
            id: dto.stop.id.clone(),
            name: dto.stop.name.clone(),
            location,
        },
    })
}

/// Convert an intercity trip row.
pub fn convert_intercity_trip(dto: &IntercityTripDto) -> Result<IntercityTrip, ConversionError> {
    let departure_times = dto
        .departure_times
        .iter()
        .map(|t| parse_time(&dto.id, "departure_times", t))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(IntercityTrip::new(
        dto.id.clone(),
        dto.destination.clone(),
        dto.company_name.clone(),
        departure_times,
        dto.price.clone(),
    ))
}

/// Convert a list of rows, skipping (and logging) the ones that fail.
pub fn convert_all<D, T>(
    rows: &[D],
    convert: impl Fn(&D) -> Result<T, ConversionError>,
) -> Vec<T> {
    rows.iter()
        .filter_map(|row| match convert(row) {
            Ok(converted) => Some(converted),
            Err(e) => {
                warn!(error = %e, "skipping invalid schedule record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::StopDto;

    fn route_dto(start: &str, end: &str, headway: i64) -> RouteDto {
        RouteDto {
            id: "r1".into(),
            title: "Merkez - Hastane".into(),
            start_time: start.into(),
            end_time: end.into(),
            frequency_min: headway,
        }
    }

    fn route_stop_dto(minutes: i64, lat: f64) -> RouteStopDto {
        RouteStopDto {
            id: "rs1".into(),
            minutes_from_start: minutes,
            stop: StopDto {
                id: "s1".into(),
                name: "Belediye".into(),
                latitude: lat,
                longitude: 36.0963,
            },
        }
    }

    #[test]
    fn route_converts() {
        let route = convert_route(&route_dto("07:00:00", "23:00:00", 30)).unwrap();
        assert_eq!(route.service_start, TimeOfDay::new(7, 0).unwrap());
        assert_eq!(route.service_end, TimeOfDay::new(23, 0).unwrap());
        assert_eq!(route.headway_minutes, 30);
    }

    #[test]
    fn route_keeps_bad_headway() {
        // Headway is checked by the projector, not here
        let route = convert_route(&route_dto("07:00:00", "23:00:00", 0)).unwrap();
        assert_eq!(route.headway_minutes, 0);
    }

    #[test]
    fn route_rejects_bad_time() {
        let err = convert_route(&route_dto("7am", "23:00:00", 30)).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::InvalidTime {
                field: "start_time",
                ..
            }
        ));
        assert!(err.to_string().starts_with("record r1: start_time: invalid time"));
    }

    #[test]
    fn route_stop_converts() {
        let item = convert_route_stop(&route_stop_dto(10, 37.3742)).unwrap();
        assert_eq!(item.offset, StopOffset::new(10));
        assert_eq!(item.stop.name, "Belediye");
        assert_eq!(item.stop.location.latitude, 37.3742);
    }

    #[test]
    fn route_stop_rejects_negative_offset() {
        let err = convert_route_stop(&route_stop_dto(-3, 37.3742)).unwrap_err();
        assert_eq!(
            err,
            ConversionError::InvalidOffset {
                id: "rs1".into(),
                minutes: -3
            }
        );
    }

    #[test]
    fn route_stop_rejects_bad_location() {
        let err = convert_route_stop(&route_stop_dto(5, 137.0)).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidLocation { .. }));
    }

    #[test]
    fn intercity_converts_and_sorts() {
        let dto = IntercityTripDto {
            id: "t1".into(),
            destination: "Osmaniye".into(),
            company_name: None,
            departure_times: vec!["17:00".into(), "09:30:00".into()],
            price: Some("120 TL".into()),
        };
        let trip = convert_intercity_trip(&dto).unwrap();
        assert_eq!(
            trip.departure_times,
            vec![TimeOfDay::new(9, 30).unwrap(), TimeOfDay::new(17, 0).unwrap()]
        );
    }

    #[test]
    fn convert_all_skips_invalid_rows() {
        let rows = vec![
            route_dto("07:00:00", "23:00:00", 30),
            route_dto("bad", "23:00:00", 30),
            route_dto("06:30:00", "21:00:00", 15),
        ];
        let routes = convert_all(&rows, convert_route);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[1].headway_minutes, 15);
    }
}
