//! Internal Diesel row structs and their conversions to domain types.
//!
//! Rows never leave the persistence module.

use diesel::prelude::*;
use serde_json::Value;

use crate::domain::{
    Hospedagem, Pacote, PacoteId, PacoteInput, Passagem, Role, StoredCredential, Vendedor,
    VendedorId,
};

use super::schema::{pacotes, vendedores};

/// Failure to turn stored columns back into domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum RowDecodeError {
    #[error("vendedor {id}: {source}")]
    Role {
        id: i64,
        source: crate::domain::UnknownRole,
    },
    #[error("pacote {id}: invalid {column} document: {message}")]
    Document {
        id: i64,
        column: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = vendedores)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VendedorRow {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub role: String,
}

impl TryFrom<VendedorRow> for Vendedor {
    type Error = RowDecodeError;

    fn try_from(row: VendedorRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<Role>()
            .map_err(|source| RowDecodeError::Role { id: row.id, source })?;
        Ok(Self {
            id: VendedorId::new(row.id),
            nome: row.nome,
            email: row.email,
            senha: StoredCredential::from_stored(row.senha),
            role,
        })
    }
}

/// Column values shared by inserts and updates.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = vendedores)]
pub(crate) struct VendedorValues<'a> {
    pub nome: &'a str,
    pub email: &'a str,
    pub senha: &'a str,
    pub role: &'a str,
}

impl<'a> VendedorValues<'a> {
    pub fn new(nome: &'a str, email: &'a str, senha: &'a StoredCredential, role: Role) -> Self {
        Self {
            nome,
            email,
            senha: senha.as_str(),
            role: role.as_str(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pacotes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PacoteRow {
    pub id: i64,
    pub titulo: Option<String>,
    pub descricao: Option<String>,
    pub preco_base: Option<f64>,
    pub imagem_url: Option<String>,
    pub passagem: Option<Value>,
    pub hospedagem: Option<Value>,
}

fn decode_document<T: serde::de::DeserializeOwned>(
    id: i64,
    column: &'static str,
    value: Option<Value>,
) -> Result<Option<T>, RowDecodeError> {
    value
        .filter(|doc| !doc.is_null())
        .map(serde_json::from_value)
        .transpose()
        .map_err(|err| RowDecodeError::Document {
            id,
            column,
            message: err.to_string(),
        })
}

fn encode_document<T: serde::Serialize>(value: Option<&T>) -> Option<Value> {
    // Serialising plain option/string/number structs cannot fail.
    value.and_then(|doc| serde_json::to_value(doc).ok())
}

impl TryFrom<PacoteRow> for Pacote {
    type Error = RowDecodeError;

    fn try_from(row: PacoteRow) -> Result<Self, Self::Error> {
        let passagem = decode_document::<Passagem>(row.id, "passagem", row.passagem)?;
        let hospedagem = decode_document::<Hospedagem>(row.id, "hospedagem", row.hospedagem)?;
        Ok(Self {
            id: PacoteId::new(row.id),
            titulo: row.titulo,
            descricao: row.descricao,
            preco_base: row.preco_base,
            imagem_url: row.imagem_url,
            passagem,
            hospedagem,
        })
    }
}

/// Column values shared by inserts and updates. `None` writes NULL.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = pacotes)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PacoteValues<'a> {
    pub titulo: Option<&'a str>,
    pub descricao: Option<&'a str>,
    pub preco_base: Option<f64>,
    pub imagem_url: Option<&'a str>,
    pub passagem: Option<Value>,
    pub hospedagem: Option<Value>,
}

impl<'a> From<&'a PacoteInput> for PacoteValues<'a> {
    fn from(input: &'a PacoteInput) -> Self {
        Self {
            titulo: input.titulo.as_deref(),
            descricao: input.descricao.as_deref(),
            preco_base: input.preco_base,
            imagem_url: input.imagem_url.as_deref(),
            passagem: encode_document(input.passagem.as_ref()),
            hospedagem: encode_document(input.hospedagem.as_ref()),
        }
    }
}

impl<'a> From<&'a Pacote> for PacoteValues<'a> {
    fn from(pacote: &'a Pacote) -> Self {
        Self {
            titulo: pacote.titulo.as_deref(),
            descricao: pacote.descricao.as_deref(),
            preco_base: pacote.preco_base,
            imagem_url: pacote.imagem_url.as_deref(),
            passagem: encode_document(pacote.passagem.as_ref()),
            hospedagem: encode_document(pacote.hospedagem.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn row(passagem: Option<Value>) -> PacoteRow {
        PacoteRow {
            id: 4,
            titulo: Some("Rio".to_owned()),
            descricao: None,
            preco_base: Some(1000.0),
            imagem_url: None,
            passagem,
            hospedagem: None,
        }
    }

    #[test]
    fn pacote_row_decodes_nested_documents() {
        let pacote = Pacote::try_from(row(Some(json!({
            "companhia": "LATAM",
            "dataIda": "2025-01-10"
        }))))
        .expect("decodes");
        let passagem = pacote.passagem.expect("ticket");
        assert_eq!(passagem.companhia.as_deref(), Some("LATAM"));
        assert_eq!(passagem.data_ida, NaiveDate::from_ymd_opt(2025, 1, 10));
        assert!(pacote.hospedagem.is_none());
    }

    #[test]
    fn json_null_documents_decode_as_absent() {
        let pacote = Pacote::try_from(row(Some(Value::Null))).expect("decodes");
        assert!(pacote.passagem.is_none());
    }

    #[test]
    fn malformed_documents_are_reported() {
        let err = Pacote::try_from(row(Some(json!({ "dataIda": "amanhã" })))).expect_err("bad");
        assert!(matches!(
            err,
            RowDecodeError::Document {
                column: "passagem",
                ..
            }
        ));
    }

    #[test]
    fn pacote_values_encode_nested_documents() {
        let input = PacoteInput {
            hospedagem: Some(Hospedagem {
                hotel: Some("Pousada".to_owned()),
                cidade: None,
                noites: Some(2),
            }),
            ..PacoteInput::default()
        };
        let values = PacoteValues::from(&input);
        assert_eq!(values.passagem, None);
        assert_eq!(
            values.hospedagem,
            Some(json!({ "hotel": "Pousada", "cidade": null, "noites": 2 }))
        );
    }

    #[test]
    fn vendedor_row_with_unknown_role_is_rejected() {
        let err = Vendedor::try_from(VendedorRow {
            id: 3,
            nome: "Ana".to_owned(),
            email: "ana@agencia.com".to_owned(),
            senha: "{noop}1".to_owned(),
            role: "GERENTE".to_owned(),
        })
        .expect_err("unknown role");
        assert!(err.to_string().contains("GERENTE"));
    }
}
