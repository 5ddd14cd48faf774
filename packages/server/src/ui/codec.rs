//! Plaintext wire encoding.
//!
//! Request bodies are comma-delimited fields; list responses are comma-joined
//! names. This is the only place that knows about the delimiter on the server.

use std::fmt::Display;

use axum::{body::Bytes, extract::rejection::BytesRejection};

use super::error::ApiError;

/// Field delimiter of request and response bodies
pub const DELIMITER: char = ',';

/// Read a request body as UTF-8 text.
pub fn read_body(body: Result<Bytes, BytesRejection>) -> Result<String, ApiError> {
    let bytes = body.map_err(|e| ApiError::BodyRead(e.body_text()))?;
    String::from_utf8(bytes.to_vec()).map_err(|e| ApiError::BodyRead(e.to_string()))
}

/// `<roomname>` with no delimiter
pub fn decode_room_name(body: &str) -> Result<&str, ApiError> {
    if body.contains(DELIMITER) {
        return Err(ApiError::MalformedBody {
            expected: "1 arg (roomName)",
        });
    }
    Ok(body)
}

/// `<roomname>,<username>`
pub fn decode_join_room(body: &str) -> Result<(&str, &str), ApiError> {
    let fields: Vec<&str> = body.split(DELIMITER).collect();
    match fields.as_slice() {
        [room, user] => Ok((*room, *user)),
        _ => Err(ApiError::MalformedBody {
            expected: "2 args comma separated (roomName, username)",
        }),
    }
}

/// `<roomname>,<username>,<text>`; the text keeps any further delimiters.
pub fn decode_post_message(body: &str) -> Result<(&str, &str, &str), ApiError> {
    let fields: Vec<&str> = body.splitn(3, DELIMITER).collect();
    match fields.as_slice() {
        [room, user, text] => Ok((*room, *user, *text)),
        _ => Err(ApiError::MalformedBody {
            expected: "3 args comma separated (roomName, username, message)",
        }),
    }
}

/// Join names with the delimiter; an empty list encodes as an empty body.
pub fn encode_names<T: Display>(names: &[T]) -> String {
    names
        .iter()
        .map(|name| name.to_string())
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_body_rejects_invalid_utf8() {
        // テスト項目: UTF-8 として不正なボディは BodyRead エラー
        // given (前提条件):
        let body = Ok(Bytes::from_static(&[0xff, 0xfe]));

        // when (操作):
        let result = read_body(body);

        // then (期待する結果):
        assert!(matches!(result, Err(ApiError::BodyRead(_))));
    }

    #[test]
    fn test_decode_join_room() {
        // テスト項目: ちょうど 2 フィールドのときだけ成功する
        assert_eq!(decode_join_room("general,alice").unwrap(), ("general", "alice"));
        assert!(matches!(
            decode_join_room("general"),
            Err(ApiError::MalformedBody { .. })
        ));
        assert!(matches!(
            decode_join_room("general,alice,bob"),
            Err(ApiError::MalformedBody { .. })
        ));
    }

    #[test]
    fn test_decode_post_message_keeps_commas_in_text() {
        // テスト項目: 本文中のカンマは本文の一部として扱われる
        // when (操作):
        let result = decode_post_message("general,alice,hi, how are you?");

        // then (期待する結果):
        assert_eq!(result.unwrap(), ("general", "alice", "hi, how are you?"));
    }

    #[test]
    fn test_decode_post_message_requires_three_fields() {
        // テスト項目: フィールドが足りない場合は MalformedBody
        let result = decode_post_message("general,alice");

        assert!(matches!(result, Err(ApiError::MalformedBody { .. })));
    }

    #[test]
    fn test_decode_room_name_rejects_delimiter() {
        // テスト項目: ルーム名のみのボディにカンマが含まれていれば MalformedBody
        assert_eq!(decode_room_name("general").unwrap(), "general");
        assert!(matches!(
            decode_room_name("general,alice"),
            Err(ApiError::MalformedBody { .. })
        ));
    }

    #[test]
    fn test_encode_names() {
        // テスト項目: 名前はカンマ区切りで連結され、空リストは空文字列になる
        assert_eq!(encode_names(&["alice", "bob"]), "alice,bob");
        assert_eq!(encode_names::<&str>(&[]), "");
    }
}
