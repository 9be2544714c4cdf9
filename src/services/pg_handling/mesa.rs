use actix::Handler;
use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::dsl::max;
use diesel::prelude::*;

use crate::services::db_models::{Empresa, ItemMesa, Mesa, MesaDetalhe};
use crate::services::db_utils::PgActor;
use crate::services::insertable::{MesaChangeset, NewItemMesa, NewMesa};
use crate::services::messages::{
    AddItemToMesa, CancelMesaPedido, CreateMesa, DeleteMesa, FetchMesa, FetchMesas,
    RemoveItemFromMesa, UpdateMesa,
};
use crate::services::pg_handling::{
    detalhe_mesa, devolver_estoque, establish_connection, mesa_por_slug, produto_por_id,
    reservar_estoque,
};
use crate::services::slug;
use crate::types::{MesaStatus, ShopError};

/// Order numbers are a single sequence across every table of the house.
fn proximo_numero_pedido(conn: &mut PgConnection) -> Result<i32, ShopError> {
    use crate::schema::mesas::dsl::{mesas, pedido};

    let maior = mesas.select(max(pedido)).first::<Option<i32>>(conn)?;
    Ok(maior.unwrap_or(0) + 1)
}

fn contar_itens(conn: &mut PgConnection, mesa: i64) -> Result<i64, ShopError> {
    use crate::schema::itens_mesa::dsl::{itens_mesa, mesa_id};

    Ok(itens_mesa.filter(mesa_id.eq(mesa)).count().get_result::<i64>(conn)?)
}

fn slug_unico_mesa(conn: &mut PgConnection, nome: &str) -> Result<String, ShopError> {
    use crate::schema::mesas::dsl::{mesas, slug as slug_col};

    let base = slug::slugify(nome);
    let ocupado: bool =
        diesel::select(diesel::dsl::exists(mesas.filter(slug_col.eq(&base)))).get_result(conn)?;

    Ok(if ocupado { slug::suffixed(&base, 5) } else { base })
}

impl Handler<FetchMesas> for PgActor {
    type Result = Result<Vec<MesaDetalhe>, ShopError>;

    fn handle(&mut self, _msg: FetchMesas, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::mesas::dsl::{id, mesas};

        let mut conn = establish_connection(&self.0)?;

        let todas = mesas.order(id.asc()).load::<Mesa>(&mut conn)?;
        todas
            .into_iter()
            .map(|mesa| detalhe_mesa(&mut conn, mesa))
            .collect()
    }
}

impl Handler<CreateMesa> for PgActor {
    type Result = Result<MesaDetalhe, ShopError>;

    fn handle(&mut self, msg: CreateMesa, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::empresas::dsl::{empresas, id as empresa_pk};
        use crate::schema::mesas::dsl::mesas;

        let mut conn = establish_connection(&self.0)?;

        // without an explicit empresa the first registered one is assumed,
        // matching how single-tenant deployments call this endpoint
        let empresa = match msg.empresa_id {
            Some(valor) => empresas.find(valor).first::<Empresa>(&mut conn).optional()?,
            None => empresas.order(empresa_pk.asc()).first::<Empresa>(&mut conn).optional()?,
        }
        .ok_or_else(|| ShopError::Validation("Empresa não encontrada".into()))?;

        let slug_mesa = slug_unico_mesa(&mut conn, &msg.nome)?;
        let agora = Utc::now().naive_utc();

        let criada = diesel::insert_into(mesas)
            .values(NewMesa {
                empresa_id: empresa.id,
                numero: msg.numero,
                nome: msg.nome,
                descricao: msg.descricao,
                status: MesaStatus::Livre.as_str().to_owned(),
                pedido: 0,
                valor_pago: BigDecimal::from(0),
                pessoas_pagaram: 0,
                numero_pessoas: msg.numero_pessoas.unwrap_or(1),
                slug: slug_mesa,
                is_available: true,
                created: agora,
                updated: agora,
                not_numerico: msg.not_numerico.unwrap_or(false),
            })
            .get_result::<Mesa>(&mut conn)?;

        Ok(MesaDetalhe::new(criada, vec![]))
    }
}

impl Handler<FetchMesa> for PgActor {
    type Result = Result<MesaDetalhe, ShopError>;

    fn handle(&mut self, msg: FetchMesa, _ctx: &mut Self::Context) -> Self::Result {
        let mut conn = establish_connection(&self.0)?;

        let mesa = mesa_por_slug(&mut conn, &msg.slug)?;
        detalhe_mesa(&mut conn, mesa)
    }
}

impl Handler<UpdateMesa> for PgActor {
    type Result = Result<MesaDetalhe, ShopError>;

    fn handle(&mut self, msg: UpdateMesa, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::mesas::dsl::mesas;

        let mut conn = establish_connection(&self.0)?;

        let mesa = mesa_por_slug(&mut conn, &msg.slug)?;
        let atualizada = diesel::update(mesas.find(mesa.id))
            .set(&MesaChangeset {
                numero: msg.numero,
                nome: msg.nome,
                descricao: msg.descricao,
                numero_pessoas: msg.numero_pessoas,
                not_numerico: msg.not_numerico,
                updated: Utc::now().naive_utc(),
            })
            .get_result::<Mesa>(&mut conn)?;

        detalhe_mesa(&mut conn, atualizada)
    }
}

impl Handler<DeleteMesa> for PgActor {
    type Result = Result<(), ShopError>;

    fn handle(&mut self, msg: DeleteMesa, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::itens_mesa::dsl::{itens_mesa, mesa_id};
        use crate::schema::mesas::dsl::mesas;

        let mut conn = establish_connection(&self.0)?;

        conn.build_transaction().run(|trx| {
            let mesa = mesa_por_slug(trx, &msg.slug)?;

            diesel::delete(itens_mesa.filter(mesa_id.eq(mesa.id))).execute(trx)?;
            diesel::delete(mesas.find(mesa.id)).execute(trx)?;

            Ok(())
        })
    }
}

impl Handler<AddItemToMesa> for PgActor {
    type Result = Result<MesaDetalhe, ShopError>;

    fn handle(&mut self, msg: AddItemToMesa, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::itens_mesa::dsl::{itens_mesa, mesa_id, produto_id, quantidade};
        use crate::schema::mesas::dsl::{mesas, pedido, status, updated};

        let mut conn = establish_connection(&self.0)?;

        conn.build_transaction().run(|trx| {
            let mesa = mesa_por_slug(trx, &msg.mesa_slug)?;
            let produto = produto_por_id(trx, msg.produto_id)?;

            reservar_estoque(trx, produto.id, msg.quantidade)?;

            // the first item opens the table: it takes the next number in
            // the house-wide order sequence
            let numero_pedido = if contar_itens(trx, mesa.id)? == 0 {
                proximo_numero_pedido(trx)?
            } else {
                mesa.pedido
            };

            let existente = itens_mesa
                .filter(mesa_id.eq(mesa.id))
                .filter(produto_id.eq(produto.id))
                .first::<ItemMesa>(trx)
                .optional()?;

            match existente {
                Some(item) => {
                    diesel::update(itens_mesa.find(item.id))
                        .set(quantidade.eq(quantidade + msg.quantidade))
                        .execute(trx)?;
                }
                None => {
                    // nome/slug are denormalized so the comanda keeps
                    // displaying what was ordered even after a rename
                    diesel::insert_into(itens_mesa)
                        .values(NewItemMesa {
                            mesa_id: mesa.id,
                            produto_id: produto.id,
                            quantidade: msg.quantidade,
                            preco_unitario: produto.venda.clone(),
                            produto_nome: produto.nome.clone(),
                            produto_slug: produto.slug.clone(),
                            slug: format!("{}-{}", produto.slug, slug::slugify(&mesa.numero)),
                        })
                        .execute(trx)?;
                }
            }

            diesel::update(mesas.find(mesa.id))
                .set((
                    status.eq(MesaStatus::Ocupada.as_str()),
                    pedido.eq(numero_pedido),
                    updated.eq(Utc::now().naive_utc()),
                ))
                .execute(trx)?;

            let atualizada = mesas.find(mesa.id).first::<Mesa>(trx)?;
            detalhe_mesa(trx, atualizada)
        })
    }
}

impl Handler<RemoveItemFromMesa> for PgActor {
    type Result = Result<MesaDetalhe, ShopError>;

    fn handle(&mut self, msg: RemoveItemFromMesa, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::itens_mesa::dsl::{id as item_pk, itens_mesa, mesa_id};
        use crate::schema::mesas::dsl::{mesas, pedido, status, updated};

        let mut conn = establish_connection(&self.0)?;

        conn.build_transaction().run(|trx| {
            let mesa = mesa_por_slug(trx, &msg.mesa_slug)?;

            let item = itens_mesa
                .filter(mesa_id.eq(mesa.id))
                .filter(item_pk.eq(msg.item_id))
                .first::<ItemMesa>(trx)
                .optional()?
                .ok_or_else(|| ShopError::NotFound("Item não encontrado".into()))?;

            diesel::delete(itens_mesa.find(item.id)).execute(trx)?;
            devolver_estoque(trx, item.produto_id, item.quantidade)?;

            // an emptied table goes back to the pool
            if contar_itens(trx, mesa.id)? == 0 {
                diesel::update(mesas.find(mesa.id))
                    .set((
                        status.eq(MesaStatus::Livre.as_str()),
                        pedido.eq(0),
                        updated.eq(Utc::now().naive_utc()),
                    ))
                    .execute(trx)?;
            }

            let atualizada = mesas.find(mesa.id).first::<Mesa>(trx)?;
            detalhe_mesa(trx, atualizada)
        })
    }
}

impl Handler<CancelMesaPedido> for PgActor {
    type Result = Result<(), ShopError>;

    fn handle(&mut self, msg: CancelMesaPedido, _ctx: &mut Self::Context) -> Self::Result {
        use crate::schema::itens_mesa::dsl::{itens_mesa, mesa_id};
        use crate::schema::mesas::dsl::{mesas, pedido, status, updated};

        let mut conn = establish_connection(&self.0)?;

        conn.build_transaction().run(|trx| {
            let mesa = mesa_por_slug(trx, &msg.slug)?;

            let itens = itens_mesa
                .filter(mesa_id.eq(mesa.id))
                .load::<ItemMesa>(trx)?;

            // cancelling returns every reserved unit, same policy as the
            // online cart
            for item in &itens {
                devolver_estoque(trx, item.produto_id, item.quantidade)?;
            }
            diesel::delete(itens_mesa.filter(mesa_id.eq(mesa.id))).execute(trx)?;

            diesel::update(mesas.find(mesa.id))
                .set((
                    status.eq(MesaStatus::Livre.as_str()),
                    pedido.eq(0),
                    updated.eq(Utc::now().naive_utc()),
                ))
                .execute(trx)?;

            log::info!("pedido da mesa {} cancelado, {} itens devolvidos", mesa.slug, itens.len());
            Ok(())
        })
    }
}
