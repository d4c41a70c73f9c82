//! Travel packages (pacotes) with optional ticket and lodging details.
//!
//! A package exclusively owns at most one [`Passagem`] and one [`Hospedagem`].
//! Updates follow [`PacoteInput::merge_into`]: top-level scalars are always
//! replaced, nested objects are only touched when the input carries them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Store-generated package identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = i64, example = 1)]
pub struct PacoteId(i64);

impl PacoteId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PacoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Flight ticket bundled into a package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Passagem {
    #[schema(example = "LATAM")]
    pub companhia: Option<String>,
    pub origem: Option<String>,
    pub destino: Option<String>,
    pub data_ida: Option<NaiveDate>,
    pub data_volta: Option<NaiveDate>,
}

/// Lodging bundled into a package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hospedagem {
    pub hotel: Option<String>,
    pub cidade: Option<String>,
    pub noites: Option<i32>,
}

/// Persisted package record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pacote {
    pub id: PacoteId,
    #[schema(example = "Rio")]
    pub titulo: Option<String>,
    pub descricao: Option<String>,
    #[schema(example = 1000.0)]
    pub preco_base: Option<f64>,
    #[schema(example = "/files/pacotes/0f8c1d0e9a7b4c3d8e2f1a0b9c8d7e6f.jpg")]
    pub imagem_url: Option<String>,
    pub passagem: Option<Passagem>,
    pub hospedagem: Option<Hospedagem>,
}

/// Package body accepted on create and update.
///
/// Any `id` in the JSON body is ignored; identifiers come from the store or
/// the request path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PacoteInput {
    pub titulo: Option<String>,
    pub descricao: Option<String>,
    pub preco_base: Option<f64>,
    pub imagem_url: Option<String>,
    pub passagem: Option<Passagem>,
    pub hospedagem: Option<Hospedagem>,
}

impl PacoteInput {
    /// Build the record persisted on creation.
    #[must_use]
    pub fn into_pacote(self, id: PacoteId) -> Pacote {
        Pacote {
            id,
            titulo: self.titulo,
            descricao: self.descricao,
            preco_base: self.preco_base,
            imagem_url: self.imagem_url,
            passagem: self.passagem,
            hospedagem: self.hospedagem,
        }
    }

    /// Merge this input into an existing package.
    ///
    /// `titulo`, `descricao` and `precoBase` are overwritten even when null.
    /// `imagemUrl` is only changed through the image upload. A present nested
    /// object overwrites every field of the stored one (creating it when
    /// missing); an absent nested object leaves the stored one untouched.
    ///
    /// # Examples
    /// ```
    /// use agencia::domain::{Hospedagem, PacoteId, PacoteInput};
    ///
    /// let mut stored = PacoteInput {
    ///     titulo: Some("Rio".into()),
    ///     hospedagem: Some(Hospedagem { noites: Some(3), ..Hospedagem::default() }),
    ///     ..PacoteInput::default()
    /// }
    /// .into_pacote(PacoteId::new(1));
    ///
    /// PacoteInput { titulo: Some("Rio Beach".into()), ..PacoteInput::default() }
    ///     .merge_into(&mut stored);
    /// assert_eq!(stored.titulo.as_deref(), Some("Rio Beach"));
    /// assert_eq!(stored.hospedagem.and_then(|h| h.noites), Some(3));
    /// ```
    pub fn merge_into(&self, target: &mut Pacote) {
        target.titulo.clone_from(&self.titulo);
        target.descricao.clone_from(&self.descricao);
        target.preco_base = self.preco_base;

        if let Some(passagem) = &self.passagem {
            let stored = target.passagem.get_or_insert_with(Passagem::default);
            stored.companhia.clone_from(&passagem.companhia);
            stored.origem.clone_from(&passagem.origem);
            stored.destino.clone_from(&passagem.destino);
            stored.data_ida = passagem.data_ida;
            stored.data_volta = passagem.data_volta;
        }

        if let Some(hospedagem) = &self.hospedagem {
            let stored = target.hospedagem.get_or_insert_with(Hospedagem::default);
            stored.hotel.clone_from(&hospedagem.hotel);
            stored.cidade.clone_from(&hospedagem.cidade);
            stored.noites = hospedagem.noites;
        }
    }
}
