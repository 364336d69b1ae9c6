//! Generation prompts sent to the text-generation collaborator in live mode.

use crate::document::FormData;

// ── Prompt templates ──

const POWER_OF_ATTORNEY_ROLE: &str = "\
Eres un asistente legal experto en la redacción de documentos notariales en Perú.
Tu tarea es redactar un PODER ESPECIAL basado en la siguiente información.
El documento debe ser formal, preciso y seguir la estructura legal estándar para un poder notarial en Perú.
Usa los datos proporcionados para completar las secciones correspondientes. No inventes información que no se te proporciona.";

const LAWSUIT_RESPONSE_ROLE: &str = "\
Eres un abogado experto en derecho laboral peruano.
Tu tarea es redactar una contestación de demanda laboral sólida y bien fundamentada en base al resumen proporcionado.
Niega las afirmaciones del demandante de manera fundamentada y profesional.";

const LAWSUIT_RESPONSE_INSTRUCTIONS: &str = "\
**Instrucciones para la Contestación:**
1. Utiliza un tono formal y legal.
2. Estructura la contestación con una introducción, una sección de \"Contradicción y Fundamentos de Hecho\", donde niegues cada punto de la demanda, y una conclusión (\"Por lo tanto:\").
3. Ofrece una defensa plausible. Por ejemplo, si se alega despido arbitrario, argumenta que la relación laboral terminó por mutuo acuerdo, renuncia voluntaria, o una causa justa prevista en la ley.
4. Finaliza solicitando que la demanda sea declarada infundada en todos sus extremos.";

/// Build the generation prompt for a power-of-attorney draft.
pub fn power_of_attorney(data: &FormData) -> String {
    let grantor = data.value("grantorName");
    let grantor_dni = data.value("grantorDNI");
    let grantor_address = data.value("grantorAddress");
    let attorney = data.value("attorneyName");
    let attorney_dni = data.value("attorneyDNI");
    let attorney_address = data.value("attorneyAddress");
    let powers = data.value("powers");

    format!(
        "{POWER_OF_ATTORNEY_ROLE}\n\
         \n\
         **Información para el Poder Especial:**\n\
         \n\
         1. **PODERDANTE (Quien otorga el poder):**\n\
         * Nombre Completo: {grantor}\n\
         * DNI: {grantor_dni}\n\
         * Domicilio: {grantor_address}\n\
         \n\
         2. **APODERADO (Quien recibe el poder):**\n\
         * Nombre Completo: {attorney}\n\
         * DNI: {attorney_dni}\n\
         * Domicilio: {attorney_address}\n\
         \n\
         3. **FACULTADES ESPECÍFICAS A OTORGAR:**\n\
         * {powers}\n\
         \n\
         **Formato del Documento (sigue esta estructura y complétala):**\n\
         \n\
         ---\n\
         \n\
         **PODER ESPECIAL**\n\
         \n\
         **SEÑOR NOTARIO:**\n\
         Sírvase usted extender en su Registro de Escrituras Públicas una de PODER ESPECIAL que otorga \
         el PODERDANTE, don/doña **{grantor}**, identificado/a con DNI N° **{grantor_dni}**, con domicilio \
         en **{grantor_address}**; a favor del APODERADO, don/doña **{attorney}**, identificado/a con DNI \
         N° **{attorney_dni}**, con domicilio en **{attorney_address}**; en los términos y condiciones siguientes:\n\
         \n\
         **PRIMERO: OBJETO DEL PODER**\n\
         Por el presente instrumento, el PODERDANTE otorga PODER ESPECIAL, amplio y suficiente, a favor de \
         su APODERADO para que, en su nombre y representación, pueda realizar los siguientes actos:\n\
         {powers}\n\
         \n\
         **SEGUNDO: CARÁCTER DEL PODER**\n\
         Las facultades conferidas son de carácter especial y se limitan exclusivamente a lo descrito en la \
         cláusula anterior. El PODERDANTE se da por notificado/a de los alcances y efectos del presente poder, \
         ratificándose en todo su contenido.\n\
         \n\
         Agregue usted, señor Notario, la introducción y conclusión de ley, y curse los partes respectivos al \
         Registro de Mandatos y Poderes de la Oficina Registral correspondiente para su debida inscripción.\n\
         \n\
         Firmado en la ciudad de Lima, a los [Día] días del mes de [Mes] de [Año].\n\
         \n\
         (DEJA ESPACIO PARA FIRMAS)\n\
         \n\
         _________________________\n\
         **{grantor}**\n\
         DNI N° **{grantor_dni}**"
    )
}

/// Build the generation prompt for a lawsuit response draft.
pub fn lawsuit_response(data: &FormData) -> String {
    let defendant = data.value("defendantName");
    let defendant_id = data.value("defendantDNI");
    let summary = data.value("lawsuitText");

    format!(
        "{LAWSUIT_RESPONSE_ROLE}\n\
         \n\
         **Datos del Demandado:**\n\
         * Nombre o Razón Social: {defendant}\n\
         * DNI / RUC: {defendant_id}\n\
         \n\
         **Resumen de la Demanda a Contestar:**\n\
         {summary}\n\
         \n\
         {LAWSUIT_RESPONSE_INSTRUCTIONS}\n\
         \n\
         **Formato del Documento (sigue esta estructura y complétala):**\n\
         \n\
         ---\n\
         \n\
         **EXPEDIENTE N°:** [DEJAR EN BLANCO]\n\
         **SECRETARIO:** [DEJAR EN BLANCO]\n\
         **ESCRITO N°:** 01-2024\n\
         **CUADERNO:** PRINCIPAL\n\
         **SUMILLA:** CONTESTACIÓN DE DEMANDA\n\
         \n\
         **SEÑOR JUEZ DEL [NÚMERO] JUZGADO ESPECIALIZADO DE TRABAJO DE LIMA**\n\
         \n\
         **{defendant}**, identificada con RUC N° **{defendant_id}**, con domicilio real en [AÑADIR DIRECCIÓN], \
         y domicilio procesal en la casilla electrónica N° [AÑADIR NÚMERO]; en los autos seguidos por \
         [NOMBRE DEL DEMANDANTE] sobre pago de beneficios sociales y otros; a usted, respetuosamente digo:\n\
         \n\
         **I. APERSONAMIENTO Y CONTRADICCIÓN:**\n\
         Que, dentro del plazo de ley, me apersono al proceso y formulo CONTRADICCIÓN a la demanda interpuesta \
         en mi contra, solicitando que sea declarada INFUNDADA en todos sus extremos, con expresa condena de \
         costas y costos.\n\
         \n\
         **II. FUNDAMENTOS DE HECHO DE LA CONTRADICCIÓN:**\n\
         Niego y contradigo todos y cada uno de los hechos expuestos por el demandante en su escrito de demanda, \
         por no ser ciertos y carecer de sustento fáctico y legal. Específicamente, procedo a contradecir los \
         puntos principales de la siguiente manera:\n\
         (El modelo de IA debe desarrollar aquí la argumentación en base al resumen de la demanda, negando los \
         hechos o dándoles una interpretación favorable al demandado, siguiendo las instrucciones).\n\
         \n\
         **III. FUNDAMENTOS DE DERECHO:**\n\
         Amparo la presente contestación en lo dispuesto por el Texto Único Ordenado del Decreto Legislativo \
         N° 728, Ley de Productividad y Competitividad Laboral, aprobado por Decreto Supremo N° 003-97-TR, y \
         demás normas aplicables del Código Procesal Civil.\n\
         \n\
         **IV. MEDIOS PROBATORIOS:**\n\
         (El modelo de IA puede sugerir medios probatorios genéricos si corresponde, como \"Contrato de Trabajo\", \
         \"Boletas de Pago\", \"Liquidación de Beneficios Sociales\", \"Carta de Renuncia\", etc.)\n\
         \n\
         **POR LO EXPUESTO:**\n\
         A usted, Señor Juez, solicito tener por contestada la demanda en tiempo y forma, y en su oportunidad, \
         declararla INFUNDADA en todos sus extremos, con la correspondiente condena en costas y costos.\n\
         \n\
         **PRIMER OTROSÍ DIGO:** Que, de conformidad con el artículo 80° del Código Procesal Civil, otorgo al \
         abogado que autoriza el presente las facultades generales de representación a que se refiere el \
         artículo 74° del mismo cuerpo legal.\n\
         \n\
         Lima, [Día] de [Mes] de [Año].\n\
         \n\
         (DEJA ESPACIO PARA FIRMAS)\n\
         \n\
         _________________________\n\
         **{defendant}**\n\
         RUC N° **{defendant_id}**"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_attorney_prompt_carries_every_field() {
        let data: FormData = [
            ("grantorName", "ANA ROJAS"),
            ("grantorDNI", "45678901"),
            ("grantorAddress", "Calle Las Begonias 789"),
            ("attorneyName", "LUIS TORRES"),
            ("attorneyDNI", "09876543"),
            ("attorneyAddress", "Jr. de la Unión 1020"),
            ("powers", "Cobrar un cheque de gerencia"),
        ]
        .into_iter()
        .collect();

        let prompt = power_of_attorney(&data);
        for (_, value) in data.iter() {
            assert!(prompt.contains(value), "prompt is missing {value}");
        }
        assert!(prompt.contains("**PODER ESPECIAL**"));
    }

    #[test]
    fn lawsuit_prompt_embeds_summary() {
        let data: FormData = [
            ("defendantName", "ACME S.A.C."),
            ("defendantDNI", "20123456789"),
            ("lawsuitText", "Alega un despido arbitrario."),
        ]
        .into_iter()
        .collect();

        let prompt = lawsuit_response(&data);
        assert!(prompt.contains("Alega un despido arbitrario."));
        assert!(prompt.contains("RUC N° **20123456789**"));
    }

    #[test]
    fn missing_fields_render_blank() {
        let prompt = lawsuit_response(&FormData::new());
        assert!(prompt.contains("* Nombre o Razón Social: \n"));
    }
}
