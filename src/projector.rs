use serde_json::{Map, Value};

use crate::graphql::GraphQLResponse;
use crate::trips::RowError;

/// Maps every element of `data[field]` through `mapper`, in order.
///
/// Missing `data`, a missing field, or a field that is not a list all produce
/// no rows. Elements the mapper rejects are logged and skipped.
pub fn project<R, F>(response: &GraphQLResponse, field: &str, mut mapper: F) -> Vec<R>
where
    F: FnMut(&Map<String, Value>) -> Result<R, RowError>,
{
    let Some(data) = &response.data else {
        return vec![];
    };
    let records = match data.get(field) {
        None | Some(Value::Null) => return vec![],
        Some(Value::Array(records)) => records,
        Some(..) => {
            log::warn!("Expected `{field}` to be a list, ignoring it");
            return vec![];
        }
    };
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let row = match record {
                Value::Object(record) => mapper(record),
                _ => Err(RowError::NotAnObject),
            };
            match row {
                Ok(row) => Some(row),
                Err(error) => {
                    log::error!("Skipping {field}[{index}]: {error}");
                    None
                }
            }
        })
        .collect()
}

/// Logs every server-reported error and returns the first one for display.
pub fn surface_errors(response: &GraphQLResponse) -> Option<String> {
    for error in response.errors() {
        log::error!("{}", error);
    }
    response.errors().first().map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trips::TripRow;

    fn response(json: &str) -> GraphQLResponse {
        serde_json::from_str(json).unwrap()
    }

    fn titles(response: &GraphQLResponse) -> Vec<String> {
        project(response, "allTrips", TripRow::from_record)
            .into_iter()
            .map(|trip| trip.title)
            .collect()
    }

    #[test]
    fn keeps_every_well_formed_record_in_order() {
        let response = response(
            r#"{"data":{"allTrips":[
                {"title":"Vacation","startTime":"2017-08-01T08:00:00+0000"},
                {"title":"Business","startTime":"2017-05-10T09:00:00+0000"},
                {"title":"Conference","startTime":"2017-11-20T10:00:00+0000"},
                {"title":"Visit","startTime":"2017-02-14T11:00:00+0000"}
            ]}}"#,
        );
        assert_eq!(titles(&response), ["Vacation", "Business", "Conference", "Visit"]);
    }

    #[test]
    fn skips_malformed_records() {
        let response = response(
            r#"{"data":{"allTrips":[
                {"title":"A","startTime":"2017-06-01T10:00:00+0000"},
                {"title":"B","startTime":"June first"},
                {"title":"C","startTime":"2017-06-03T10:00:00+0000"}
            ]}}"#,
        );
        assert_eq!(titles(&response), ["A", "C"]);
    }

    #[test]
    fn skips_non_object_records() {
        let response = response(
            r#"{"data":{"allTrips":[7, {"title":"A","startTime":"2017-06-01T10:00:00+0000"}, null]}}"#,
        );
        assert_eq!(titles(&response), ["A"]);
    }

    #[test]
    fn absent_data_projects_nothing() {
        let response = response(r#"{"errors":[{"message":"boom"}]}"#);
        assert!(titles(&response).is_empty());
    }

    #[test]
    fn absent_or_mistyped_field_projects_nothing() {
        assert!(titles(&response(r#"{"data":{}}"#)).is_empty());
        assert!(titles(&response(r#"{"data":{"allTrips":null}}"#)).is_empty());
        assert!(titles(&response(r#"{"data":{"allTrips":{"title":"A"}}}"#)).is_empty());
    }

    #[test]
    fn surfaces_first_error_even_with_data() {
        let response = response(
            r#"{
                "data":{"allTrips":[{"title":"A","startTime":"2017-06-01T10:00:00+0000"}]},
                "errors":[{"message":"first"},{"message":"second"}]
            }"#,
        );
        assert_eq!(surface_errors(&response).as_deref(), Some("first"));
        assert_eq!(titles(&response), ["A"]);
    }

    #[test]
    fn no_errors_means_no_notice() {
        assert_eq!(surface_errors(&response(r#"{"data":{}}"#)), None);
        assert_eq!(surface_errors(&response(r#"{"errors":[]}"#)), None);
    }
}
